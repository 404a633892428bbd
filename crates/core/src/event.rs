use chrono::{DateTime, Utc};

/// A domain event.
///
/// Events are immutable facts emitted by an [`Aggregate`](crate::Aggregate).
pub trait Event: Clone + core::fmt::Debug {
    /// Stable event name/type identifier (e.g. "inventory.stock.added").
    fn event_type(&self) -> &'static str;

    /// When the event occurred (wall-clock time of the command).
    fn occurred_at(&self) -> DateTime<Utc>;
}

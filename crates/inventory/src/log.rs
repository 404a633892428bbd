use chrono::{DateTime, Utc};

use crate::item::{ItemName, Quantity};
use crate::store::StockAdded;

/// Timestamped record of a successful add, collected by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub occurred_at: DateTime<Utc>,
    pub item: ItemName,
    pub quantity: Quantity,
}

impl From<&StockAdded> for LogEntry {
    fn from(event: &StockAdded) -> Self {
        Self {
            occurred_at: event.occurred_at,
            item: event.item.clone(),
            quantity: event.quantity,
        }
    }
}

impl core::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}: Added {} of {}",
            self.occurred_at.format("%Y-%m-%d %H:%M:%S%.6f%:z"),
            self.quantity,
            self.item
        )
    }
}

//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. In
/// this domain an item name and a quantity are value objects: two `apple`
/// names are the same item, and a store entry is replaced rather than edited
/// in place when its quantity changes.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Quantity(u64);
///
/// impl ValueObject for Quantity {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

//! Inventory domain module.
//!
//! An [`InventoryStore`] maps item names to on-hand quantities. Mutations are
//! decided and applied through the [`stockbook_core::Aggregate`] contract;
//! the store can be snapshotted to and restored from a JSON file.

pub mod item;
pub mod log;
pub mod persistence;
pub mod report;
pub mod store;

pub use stockbook_core::DomainError;

pub use item::{ItemName, Quantity};
pub use log::LogEntry;
pub use persistence::{DEFAULT_INVENTORY_FILE, PersistenceError};
pub use report::StockReport;
pub use store::{
    AddStock, DEFAULT_LOW_STOCK_THRESHOLD, InventoryCommand, InventoryEvent, InventoryStore,
    RemoveStock, StockAdded, StockRemoved,
};

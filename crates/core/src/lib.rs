//! `stockbook-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no logging setup).

pub mod aggregate;
pub mod error;
pub mod event;
pub mod value_object;

pub use aggregate::Aggregate;
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use value_object::ValueObject;

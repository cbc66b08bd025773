//! Change notifications
//!
//! Typed pub/sub used by the schema store and the live form to tell the
//! presentation layer that a new snapshot is available.

pub mod event_types;
pub mod message_bus;

pub use event_types::*;
pub use message_bus::{Consumer, MessageBus, MessageBusError, MessageBusResult};

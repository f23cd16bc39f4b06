//! Domain layer for the vendor return service.
//!
//! This crate provides the data model the orchestrator works on:
//! - `TransactionEnvelope`, the validated inbound transaction
//! - `InventoryVerdict`, the classified outcome of the inventory call
//! - `TransactionEvent` / `NotificationEvent`, the two bus messages
//! - `OrchestrationResult`, the structured response handed back to callers

pub mod envelope;
pub mod error;
pub mod events;
pub mod result;
pub mod verdict;

pub use envelope::TransactionEnvelope;
pub use error::EnvelopeError;
pub use events::{
    BusEvent, NOTIFICATION_TYPE_FIELD, NotificationEvent, NotificationEventBuilder,
    NotificationType, RoutingKey, TransactionEvent,
};
pub use result::{OrchestrationResult, ResultData};
pub use verdict::InventoryVerdict;

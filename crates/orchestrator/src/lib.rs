//! Orchestration of a vendor return.
//!
//! A vendor return runs these steps:
//! 1. Return the quantity to inventory
//! 2. Publish the transaction record (routing key `transaction`)
//! 3. Publish the notification (routing key `notification`)
//!
//! A rejected inventory update stops the run before anything is published.
//! Nothing is compensated: an error after the first publish leaves that
//! message sent.

pub mod coordinator;
pub mod error;
pub mod services;
pub mod state;
pub mod vendor_return;

pub use coordinator::VendorReturnCoordinator;
pub use error::OrchestratorError;
pub use services::{
    AmqpEventPublisher, AmqpSettings, EventPublisher, HttpInventoryService,
    InMemoryEventPublisher, InMemoryInventoryService, InventoryCall, InventoryService,
    PublishedMessage,
};
pub use state::OrchestrationState;

//! External service traits and in-memory implementations for orchestration steps.

pub mod inventory;
pub mod publisher;

pub use inventory::{
    HttpInventoryService, InMemoryInventoryService, InventoryCall, InventoryService,
};
pub use publisher::{
    AmqpEventPublisher, AmqpSettings, EventPublisher, InMemoryEventPublisher, PublishedMessage,
};

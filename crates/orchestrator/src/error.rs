//! Orchestrator error types.

use domain::RoutingKey;
use thiserror::Error;

use crate::state::OrchestrationState;

/// Errors that abort an orchestration run.
///
/// An inventory rejection is not one of them; it is a normal verdict.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The inventory service could not be reached or its answer could not be read.
    #[error("Inventory service error: {0}")]
    InventoryTransport(String),

    /// The broker connection or exchange could not be set up.
    #[error("Broker error: {0}")]
    Broker(String),

    /// A service was constructed with unusable settings.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A message could not be handed to the broker.
    #[error("Publish to '{routing_key}' failed: {reason}")]
    Publish {
        routing_key: RoutingKey,
        reason: String,
    },

    /// An event body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The run attempted a transition its state machine does not allow.
    #[error("Invalid orchestration transition: {from} -> {to}")]
    InvalidTransition {
        from: OrchestrationState,
        to: OrchestrationState,
    },
}

impl OrchestratorError {
    /// Stable name of the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            OrchestratorError::InventoryTransport(_) => "InventoryTransport",
            OrchestratorError::Broker(_) => "Broker",
            OrchestratorError::InvalidConfiguration(_) => "InvalidConfiguration",
            OrchestratorError::Publish { .. } => "Publish",
            OrchestratorError::Serialization(_) => "Serialization",
            OrchestratorError::InvalidTransition { .. } => "InvalidTransition",
        }
    }
}

/// Convenience type alias for orchestrator results.
pub type Result<T> = std::result::Result<T, OrchestratorError>;

/// Renders an error with its source chain, e.g. `send failed: tcp connect: refused`.
pub(crate) fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

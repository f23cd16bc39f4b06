//! Orchestration state machine.

/// The state of one orchestration run.
///
/// State transitions:
/// ```text
/// Received ──► InventoryPending ──┬──► InventoryFailed
///                                 └──► Publishing ──► Completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrchestrationState {
    /// Holding a validated envelope.
    #[default]
    Received,

    /// Waiting on the inventory service.
    InventoryPending,

    /// Inventory rejected the return (terminal state).
    InventoryFailed,

    /// Publishing the transaction and notification events.
    Publishing,

    /// Both events were handed to the broker (terminal state).
    Completed,
}

impl OrchestrationState {
    /// Returns true if `next` directly follows this state.
    pub fn can_transition_to(&self, next: OrchestrationState) -> bool {
        use OrchestrationState::*;
        matches!(
            (self, next),
            (Received, InventoryPending)
                | (InventoryPending, InventoryFailed)
                | (InventoryPending, Publishing)
                | (Publishing, Completed)
        )
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrchestrationState::InventoryFailed | OrchestrationState::Completed
        )
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrchestrationState::Received => "Received",
            OrchestrationState::InventoryPending => "InventoryPending",
            OrchestrationState::InventoryFailed => "InventoryFailed",
            OrchestrationState::Publishing => "Publishing",
            OrchestrationState::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for OrchestrationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

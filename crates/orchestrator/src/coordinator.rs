//! Coordinator for vendor return orchestration.

use domain::{
    BusEvent, InventoryVerdict, NotificationEvent, NotificationType, OrchestrationResult,
    TransactionEnvelope, TransactionEvent,
};

use crate::error::OrchestratorError;
use crate::services::inventory::InventoryService;
use crate::services::publisher::EventPublisher;
use crate::state::OrchestrationState;
use crate::vendor_return;

/// Orchestrates vendor returns.
///
/// Each run calls the inventory service once and, only if it accepts the
/// return, publishes the transaction event and then the notification event.
/// The coordinator holds no per-run state, so one instance can serve any
/// number of concurrent runs.
pub struct VendorReturnCoordinator<I, P>
where
    I: InventoryService,
    P: EventPublisher,
{
    inventory: I,
    publisher: P,
}

impl<I, P> VendorReturnCoordinator<I, P>
where
    I: InventoryService,
    P: EventPublisher,
{
    /// Creates a new coordinator over long-lived service handles.
    pub fn new(inventory: I, publisher: P) -> Self {
        Self {
            inventory,
            publisher,
        }
    }

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Runs one vendor return.
    ///
    /// Returns a 201 result when both events were published and a 404 result
    /// when the inventory service rejected the return. Transport, publish and
    /// serialization failures are returned as errors for the caller to report;
    /// an event already published before the failure stays published.
    #[tracing::instrument(
        skip(self, envelope),
        fields(
            orchestration_type = vendor_return::ORCHESTRATION_TYPE,
            run_id = %uuid::Uuid::new_v4(),
            packaging_type = %envelope.packaging_type(),
        )
    )]
    pub async fn execute(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<OrchestrationResult, OrchestratorError> {
        metrics::counter!("vendor_return_executions_total").increment(1);
        let start = std::time::Instant::now();

        let outcome = self.run(envelope).await;

        let duration = start.elapsed().as_secs_f64();
        metrics::histogram!("vendor_return_duration_seconds").record(duration);
        match &outcome {
            Ok(result) if result.is_created() => {
                metrics::counter!("vendor_return_completed").increment(1);
                tracing::info!(duration, "vendor return completed");
            }
            Ok(result) => {
                metrics::counter!("vendor_return_inventory_rejected").increment(1);
                tracing::warn!(code = result.code, duration, "vendor return rejected");
            }
            Err(e) => {
                metrics::counter!("vendor_return_failed").increment(1);
                tracing::error!(error = %e, kind = e.kind(), "vendor return failed");
            }
        }

        outcome
    }

    async fn run(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<OrchestrationResult, OrchestratorError> {
        let mut state = RunState::default();

        // 1. Return stock to inventory
        state.advance(OrchestrationState::InventoryPending)?;
        tracing::info!(
            step = vendor_return::STEP_RETURN_INVENTORY,
            quantity = %envelope.quantity(),
            "step started"
        );
        let verdict = self
            .inventory
            .return_stock(envelope.packaging_type(), envelope.quantity())
            .await?;

        if let InventoryVerdict::Failure { code, .. } = &verdict {
            state.advance(OrchestrationState::InventoryFailed)?;
            tracing::warn!(code, "inventory update failed");
            return Ok(OrchestrationResult::inventory_not_found(verdict));
        }

        // 2. Transaction record, then notification
        state.advance(OrchestrationState::Publishing)?;
        let transaction = TransactionEvent::from_envelope(envelope);
        self.publish(vendor_return::STEP_PUBLISH_TRANSACTION, &transaction)
            .await?;

        let notification = NotificationEvent::builder(envelope)
            .notification_type(NotificationType::Update)
            .build();
        self.publish(vendor_return::STEP_PUBLISH_NOTIFICATION, &notification)
            .await?;

        state.advance(OrchestrationState::Completed)?;
        Ok(OrchestrationResult::created(verdict))
    }

    async fn publish<E: BusEvent>(&self, step: &str, event: &E) -> Result<(), OrchestratorError> {
        let routing_key = event.routing_key();
        let payload = event.to_payload()?;

        tracing::info!(step, %routing_key, bytes = payload.len(), "publishing event");
        self.publisher.publish(routing_key, payload).await?;
        metrics::counter!("events_published_total", "routing_key" => routing_key.as_str())
            .increment(1);

        Ok(())
    }
}

/// Tracks the state of a single run and rejects out-of-order transitions.
#[derive(Debug, Default)]
struct RunState(OrchestrationState);

impl RunState {
    fn advance(&mut self, next: OrchestrationState) -> Result<(), OrchestratorError> {
        if !self.0.can_transition_to(next) {
            return Err(OrchestratorError::InvalidTransition {
                from: self.0,
                to: next,
            });
        }
        tracing::debug!(from = %self.0, to = %next, "state transition");
        self.0 = next;
        Ok(())
    }
}

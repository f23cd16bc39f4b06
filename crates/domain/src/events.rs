//! Messages published to the shared exchange.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::envelope::TransactionEnvelope;

/// Field added to the notification variant.
pub const NOTIFICATION_TYPE_FIELD: &str = "notification_type";

/// Routing keys used on the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingKey {
    /// Durable transaction record.
    Transaction,

    /// User-facing notification.
    Notification,
}

impl RoutingKey {
    /// Returns the routing key literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingKey::Transaction => "transaction",
            RoutingKey::Notification => "notification",
        }
    }
}

impl std::fmt::Display for RoutingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminator carried by notification events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    /// Inventory was updated by a vendor return.
    #[default]
    Update,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Update => "update",
        }
    }
}

/// A message bound for the exchange.
pub trait BusEvent {
    /// The routing key the message is published with.
    fn routing_key(&self) -> RoutingKey;

    /// The JSON object sent as the message body.
    fn body(&self) -> &Map<String, Value>;

    /// Serializes the body to bytes.
    fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self.body())
    }
}

/// The transaction record: the envelope, verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEvent {
    body: Map<String, Value>,
}

impl TransactionEvent {
    pub fn from_envelope(envelope: &TransactionEnvelope) -> Self {
        Self {
            body: envelope.fields().clone(),
        }
    }
}

impl BusEvent for TransactionEvent {
    fn routing_key(&self) -> RoutingKey {
        RoutingKey::Transaction
    }

    fn body(&self) -> &Map<String, Value> {
        &self.body
    }
}

/// The notification: the envelope plus a `notification_type` discriminator.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    body: Map<String, Value>,
}

impl NotificationEvent {
    /// Starts a notification from the envelope's fields.
    pub fn builder(envelope: &TransactionEnvelope) -> NotificationEventBuilder {
        NotificationEventBuilder {
            fields: envelope.fields().clone(),
            notification_type: NotificationType::default(),
        }
    }

    pub fn notification_type(&self) -> Option<&str> {
        self.body.get(NOTIFICATION_TYPE_FIELD).and_then(Value::as_str)
    }
}

impl BusEvent for NotificationEvent {
    fn routing_key(&self) -> RoutingKey {
        RoutingKey::Notification
    }

    fn body(&self) -> &Map<String, Value> {
        &self.body
    }
}

/// Builder for `NotificationEvent`.
///
/// Owns its own copy of the envelope fields, so nothing it does can reach a
/// transaction event built from the same envelope.
#[derive(Debug, Clone)]
pub struct NotificationEventBuilder {
    fields: Map<String, Value>,
    notification_type: NotificationType,
}

impl NotificationEventBuilder {
    pub fn notification_type(mut self, notification_type: NotificationType) -> Self {
        self.notification_type = notification_type;
        self
    }

    /// Appends the discriminator. A caller-supplied `notification_type` is replaced.
    pub fn build(self) -> NotificationEvent {
        let mut body = self.fields;
        body.insert(
            NOTIFICATION_TYPE_FIELD.to_string(),
            Value::String(self.notification_type.as_str().to_string()),
        );
        NotificationEvent { body }
    }
}

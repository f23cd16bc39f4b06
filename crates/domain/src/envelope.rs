//! The validated inbound transaction.

use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::EnvelopeError;

/// Name of the packaging type field.
pub const PACKAGING_TYPE_FIELD: &str = "packaging_type";

/// Name of the quantity field.
pub const QUANTITY_FIELD: &str = "quantity";

/// One vendor return transaction as received from the caller.
///
/// Only `packaging_type` and `quantity` are interpreted. Every other field is
/// carried through untouched into the published events, in the order the
/// caller sent them.
///
/// There is no mutating API: once built, an envelope stays as received for the
/// whole orchestration run. Events are derived from it, never written into it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEnvelope {
    packaging_type: String,
    quantity: Number,
    fields: Map<String, Value>,
}

impl TransactionEnvelope {
    /// Validates an inbound payload and wraps it as an envelope.
    ///
    /// The payload must be a JSON object with a non-empty string
    /// `packaging_type` and a numeric `quantity`. The packaging type ends up
    /// as a URL path segment, so `.` and `..` are refused.
    pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => return Err(EnvelopeError::NotAnObject(json_type(&other))),
        };

        let packaging_type = match fields.get(PACKAGING_TYPE_FIELD) {
            None | Some(Value::Null) => {
                return Err(EnvelopeError::MissingField(PACKAGING_TYPE_FIELD));
            }
            Some(Value::String(s)) if s.is_empty() => {
                return Err(EnvelopeError::InvalidField {
                    field: PACKAGING_TYPE_FIELD,
                    reason: "must not be empty".to_string(),
                });
            }
            Some(Value::String(s)) if s == "." || s == ".." => {
                return Err(EnvelopeError::InvalidField {
                    field: PACKAGING_TYPE_FIELD,
                    reason: format!("'{s}' is not a usable path segment"),
                });
            }
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(EnvelopeError::InvalidField {
                    field: PACKAGING_TYPE_FIELD,
                    reason: format!("expected a string, got {}", json_type(other)),
                });
            }
        };

        let quantity = match fields.get(QUANTITY_FIELD) {
            None | Some(Value::Null) => return Err(EnvelopeError::MissingField(QUANTITY_FIELD)),
            Some(Value::Number(n)) => n.clone(),
            Some(other) => {
                return Err(EnvelopeError::InvalidField {
                    field: QUANTITY_FIELD,
                    reason: format!("expected a number, got {}", json_type(other)),
                });
            }
        };

        Ok(Self {
            packaging_type,
            quantity,
            fields,
        })
    }

    /// Returns the packaging type identifier.
    pub fn packaging_type(&self) -> &str {
        &self.packaging_type
    }

    /// Returns the quantity being returned to inventory.
    pub fn quantity(&self) -> &Number {
        &self.quantity
    }

    /// Returns all fields of the envelope, including pass-through ones.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl TryFrom<Value> for TransactionEnvelope {
    type Error = EnvelopeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl Serialize for TransactionEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_envelope() {
        let envelope =
            TransactionEnvelope::from_value(json!({"packaging_type": "box", "quantity": 5}))
                .unwrap();

        assert_eq!(envelope.packaging_type(), "box");
        assert_eq!(envelope.quantity(), &Number::from(5));
        assert_eq!(envelope.fields().len(), 2);
    }

    #[test]
    fn test_extra_fields_are_preserved_in_order() {
        let envelope = TransactionEnvelope::from_value(json!({
            "vendor_id": 7,
            "packaging_type": "crate",
            "quantity": 2.5,
            "note": "damaged lid"
        }))
        .unwrap();

        let keys: Vec<&str> = envelope.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["vendor_id", "packaging_type", "quantity", "note"]);
        assert_eq!(envelope.fields()["note"], "damaged lid");
        assert_eq!(envelope.quantity().as_f64(), Some(2.5));
    }

    #[test]
    fn test_serializes_as_received() {
        let payload = json!({"packaging_type": "box", "quantity": 5, "vendor": "acme"});
        let envelope = TransactionEnvelope::from_value(payload.clone()).unwrap();

        assert_eq!(serde_json::to_value(&envelope).unwrap(), payload);
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"packaging_type":"box","quantity":5,"vendor":"acme"}"#
        );
    }

    #[test]
    fn test_rejects_non_object() {
        let err = TransactionEnvelope::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err, EnvelopeError::NotAnObject("array"));
    }

    #[test]
    fn test_rejects_missing_packaging_type() {
        let err = TransactionEnvelope::from_value(json!({"quantity": 5})).unwrap_err();
        assert_eq!(err, EnvelopeError::MissingField("packaging_type"));
    }

    #[test]
    fn test_rejects_null_quantity() {
        let err = TransactionEnvelope::from_value(json!({"packaging_type": "box", "quantity": null}))
            .unwrap_err();
        assert_eq!(err, EnvelopeError::MissingField("quantity"));
    }

    #[test]
    fn test_rejects_empty_packaging_type() {
        let err = TransactionEnvelope::from_value(json!({"packaging_type": "", "quantity": 1}))
            .unwrap_err();
        assert!(matches!(
            err,
            EnvelopeError::InvalidField {
                field: "packaging_type",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_dot_segment_packaging_types() {
        for dots in [".", ".."] {
            let err =
                TransactionEnvelope::from_value(json!({"packaging_type": dots, "quantity": 1}))
                    .unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Invalid field 'packaging_type': '{dots}' is not a usable path segment")
            );
        }

        let dotted =
            TransactionEnvelope::from_value(json!({"packaging_type": "...", "quantity": 1}))
                .unwrap();
        assert_eq!(dotted.packaging_type(), "...");
    }

    #[test]
    fn test_rejects_non_numeric_quantity() {
        let err = TransactionEnvelope::try_from(json!({"packaging_type": "box", "quantity": "5"}))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid field 'quantity': expected a number, got string"
        );
    }
}

//! Classified outcome of the inventory call.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// What the inventory service answered, classified once at the adapter boundary.
///
/// A non-2xx answer is still a verdict, not an error: the orchestrator decides
/// what to do with it. Serializes as `{"code": ..., "body": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryVerdict {
    /// Status in `[200, 300)`.
    Success { code: u16, body: Value },

    /// Any other status.
    Failure { code: u16, body: Value },
}

impl InventoryVerdict {
    /// Classifies a raw status code and body.
    pub fn from_response(code: u16, body: Value) -> Self {
        if (200..300).contains(&code) {
            InventoryVerdict::Success { code, body }
        } else {
            InventoryVerdict::Failure { code, body }
        }
    }

    /// Returns true if the inventory update was accepted.
    pub fn is_success(&self) -> bool {
        matches!(self, InventoryVerdict::Success { .. })
    }

    /// Returns the status code reported by the inventory service.
    pub fn code(&self) -> u16 {
        match self {
            InventoryVerdict::Success { code, .. } | InventoryVerdict::Failure { code, .. } => {
                *code
            }
        }
    }

    /// Returns the response body reported by the inventory service.
    pub fn body(&self) -> &Value {
        match self {
            InventoryVerdict::Success { body, .. } | InventoryVerdict::Failure { body, .. } => {
                body
            }
        }
    }
}

#[derive(Serialize)]
struct VerdictRepr<'a> {
    code: u16,
    body: &'a Value,
}

impl Serialize for InventoryVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        VerdictRepr {
            code: self.code(),
            body: self.body(),
        }
        .serialize(serializer)
    }
}

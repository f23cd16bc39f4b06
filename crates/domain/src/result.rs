//! The structured response handed back to the caller.

use serde::Serialize;

use crate::verdict::InventoryVerdict;

/// Message attached to a rejected inventory update.
pub const INVENTORY_NOT_FOUND_MESSAGE: &str = "Inventory not found.";

/// Payload of a result that reached the inventory service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultData {
    pub inventory_result: InventoryVerdict,
}

/// Outcome of one orchestration run, or of a request rejected at the boundary.
///
/// `code` doubles as the HTTP status of the response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrchestrationResult {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResultData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OrchestrationResult {
    pub const CREATED: u16 = 201;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const PAYLOAD_TOO_LARGE: u16 = 413;
    pub const INTERNAL_ERROR: u16 = 500;

    /// Inventory accepted the return and both events were published.
    pub fn created(verdict: InventoryVerdict) -> Self {
        Self {
            code: Self::CREATED,
            data: Some(ResultData {
                inventory_result: verdict,
            }),
            message: None,
        }
    }

    /// Inventory rejected the return; nothing was published.
    pub fn inventory_not_found(verdict: InventoryVerdict) -> Self {
        Self {
            code: Self::NOT_FOUND,
            data: Some(ResultData {
                inventory_result: verdict,
            }),
            message: Some(INVENTORY_NOT_FOUND_MESSAGE.to_string()),
        }
    }

    /// The inbound request was malformed.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: Self::BAD_REQUEST,
            data: None,
            message: Some(message.into()),
        }
    }

    /// The inbound request body exceeded the configured limit.
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self {
            code: Self::PAYLOAD_TOO_LARGE,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Something failed unexpectedly while handling the request.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            code: Self::INTERNAL_ERROR,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn is_created(&self) -> bool {
        self.code == Self::CREATED
    }

    /// Returns the embedded inventory verdict, if the run got that far.
    pub fn inventory_result(&self) -> Option<&InventoryVerdict> {
        self.data.as_ref().map(|d| &d.inventory_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_created_has_no_message() {
        let verdict = InventoryVerdict::from_response(200, json!({"stock": 10}));
        let result = OrchestrationResult::created(verdict.clone());

        assert!(result.is_created());
        assert_eq!(result.inventory_result(), Some(&verdict));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"code": 201, "data": {"inventory_result": {"code": 200, "body": {"stock": 10}}}})
        );
    }

    #[test]
    fn test_inventory_not_found_shape() {
        let verdict = InventoryVerdict::from_response(404, json!({"message": "unknown type"}));
        let result = OrchestrationResult::inventory_not_found(verdict);

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "code": 404,
                "data": {"inventory_result": {"code": 404, "body": {"message": "unknown type"}}},
                "message": "Inventory not found."
            })
        );
    }

    #[test]
    fn test_error_results_omit_data() {
        let result = OrchestrationResult::internal_error("boom");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"code": 500, "message": "boom"})
        );
        assert!(result.inventory_result().is_none());

        let result = OrchestrationResult::bad_request("Invalid JSON input: nope");
        assert_eq!(result.code, 400);
        assert!(!result.is_created());
    }
}

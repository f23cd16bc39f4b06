//! Vendor return orchestration constants.

/// The orchestration type identifier, recorded on tracing spans.
pub const ORCHESTRATION_TYPE: &str = "VendorReturn";

/// Step name: Return the quantity to inventory.
pub const STEP_RETURN_INVENTORY: &str = "return_inventory";

/// Step name: Publish the transaction record.
pub const STEP_PUBLISH_TRANSACTION: &str = "publish_transaction";

/// Step name: Publish the notification.
pub const STEP_PUBLISH_NOTIFICATION: &str = "publish_notification";

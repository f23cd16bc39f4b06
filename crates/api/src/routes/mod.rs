//! HTTP route handlers.

pub mod ops;
pub mod vendor_return;

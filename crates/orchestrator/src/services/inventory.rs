//! Inventory service trait, HTTP client and in-memory implementation.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use domain::InventoryVerdict;
use reqwest::Url;
use serde_json::{Number, Value, json};

use crate::error::{OrchestratorError, describe};

/// Trait for the inventory "return" capability.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Returns `quantity` units of `packaging_type` to stock.
    ///
    /// Any answer from the service is a verdict. Only failing to get an answer
    /// is an error.
    async fn return_stock(
        &self,
        packaging_type: &str,
        quantity: &Number,
    ) -> Result<InventoryVerdict, OrchestratorError>;
}

/// Inventory service reached over HTTP.
///
/// Issues `PUT {base_url}/return/{packaging_type}` with `{"quantity": ...}`.
#[derive(Debug, Clone)]
pub struct HttpInventoryService {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpInventoryService {
    /// Creates a client with its own connection pool and request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, OrchestratorError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OrchestratorError::InvalidConfiguration(describe(&e)))?;
        Self::with_client(client, base_url)
    }

    /// Creates a service on top of an existing client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, OrchestratorError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            OrchestratorError::InvalidConfiguration(format!(
                "invalid inventory URL '{base_url}': {e}"
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(OrchestratorError::InvalidConfiguration(format!(
                "inventory URL '{base_url}' cannot carry a path"
            )));
        }
        Ok(Self { client, base_url })
    }

    /// Builds the return URL, encoding the packaging type as one path segment.
    pub fn return_url(&self, packaging_type: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("return").push(packaging_type);
        }
        url
    }
}

#[async_trait]
impl InventoryService for HttpInventoryService {
    #[tracing::instrument(skip(self))]
    async fn return_stock(
        &self,
        packaging_type: &str,
        quantity: &Number,
    ) -> Result<InventoryVerdict, OrchestratorError> {
        let url = self.return_url(packaging_type);
        let response = self
            .client
            .put(url)
            .json(&json!({ "quantity": quantity }))
            .send()
            .await
            .map_err(|e| OrchestratorError::InventoryTransport(describe(&e)))?;

        let code = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| OrchestratorError::InventoryTransport(describe(&e)))?;

        tracing::debug!(code, bytes = bytes.len(), "inventory responded");
        Ok(InventoryVerdict::from_response(code, parse_body(&bytes)))
    }
}

/// JSON when it parses, the raw text otherwise, `null` when empty.
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// A call received by `InMemoryInventoryService`.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryCall {
    pub packaging_type: String,
    pub quantity: Number,
}

#[derive(Debug)]
struct InMemoryInventoryState {
    code: u16,
    body: Value,
    fail_on_return: bool,
    calls: Vec<InventoryCall>,
}

impl Default for InMemoryInventoryState {
    fn default() -> Self {
        Self {
            code: 200,
            body: json!({ "message": "Inventory updated." }),
            fail_on_return: false,
            calls: Vec::new(),
        }
    }
}

/// In-memory inventory service for testing.
///
/// Answers every call with a scripted status and body (200 by default) and
/// records what it was asked.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryService {
    state: Arc<RwLock<InMemoryInventoryState>>,
}

impl InMemoryInventoryService {
    /// Creates a new in-memory inventory service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status and body returned by subsequent calls.
    pub fn respond_with(&self, code: u16, body: Value) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.code = code;
        state.body = body;
    }

    /// Makes subsequent calls fail as if the service were unreachable.
    pub fn set_fail_on_return(&self, fail: bool) {
        self.state
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .fail_on_return = fail;
    }

    /// Returns every call received so far, oldest first.
    pub fn calls(&self) -> Vec<InventoryCall> {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Returns the number of calls received.
    pub fn call_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .len()
    }
}

#[async_trait]
impl InventoryService for InMemoryInventoryService {
    async fn return_stock(
        &self,
        packaging_type: &str,
        quantity: &Number,
    ) -> Result<InventoryVerdict, OrchestratorError> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.calls.push(InventoryCall {
            packaging_type: packaging_type.to_string(),
            quantity: quantity.clone(),
        });

        if state.fail_on_return {
            return Err(OrchestratorError::InventoryTransport(
                "connection refused".to_string(),
            ));
        }

        Ok(InventoryVerdict::from_response(
            state.code,
            state.body.clone(),
        ))
    }
}

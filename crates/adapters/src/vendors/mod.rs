//! Vendor adapters for translating webhook payloads into raw events.
//!
//! Each adapter implements [`EventAdapter`] to turn a [`CollectorPayload`]
//! posted by its vendor into raw events, or into the full list of reasons it
//! could not.

pub mod marketo;

use std::collections::BTreeMap;

use serde_json::{json, Value};
use tracing::debug;
use tracker_core::{AdapterFailure, CollectorPayload};

use crate::outcome::AdapterOutcome;
use crate::schema::{unstruct_event_schema, SchemaResolver};

/// Adapter trait — transforms a vendor webhook payload into raw events.
pub trait EventAdapter: Send + Sync {
    /// API vendor this adapter is registered under (e.g. "com.marketo").
    fn vendor(&self) -> &str;

    /// API version this adapter is registered under (e.g. "v1").
    fn version(&self) -> &str;

    /// Convert one payload into raw events or accumulated failures.
    fn to_raw_events(
        &self,
        payload: &CollectorPayload,
        resolver: &dyn SchemaResolver,
    ) -> AdapterOutcome;
}

/// Parameter keys every unstructured event owns; query-string values never
/// override them.
pub const RESERVED_PARAMS: [&str; 4] = ["tv", "e", "p", "ue_pr"];

/// Builder for the flattened parameters of an unstructured event.
///
/// Reserved keys are set from the adapter; query-string parameters are merged
/// in afterwards, skipping reserved keys. A repeated key keeps its last value.
#[derive(Debug, Clone)]
pub struct UnstructEventParams {
    params: BTreeMap<String, String>,
}

impl UnstructEventParams {
    pub fn new(tracker_version: &str, platform: &str, schema_uri: &str, data: Value) -> Self {
        let envelope = json!({
            "schema": unstruct_event_schema().to_schema_uri(),
            "data": {
                "schema": schema_uri,
                "data": data,
            },
        });

        let params = BTreeMap::from([
            ("tv".to_string(), tracker_version.to_string()),
            ("e".to_string(), "ue".to_string()),
            ("p".to_string(), platform.to_string()),
            ("ue_pr".to_string(), envelope.to_string()),
        ]);
        Self { params }
    }

    pub fn with_querystring(mut self, querystring: &[(String, String)]) -> Self {
        for (key, value) in querystring {
            if RESERVED_PARAMS.contains(&key.as_str()) {
                debug!(key = %key, "dropping query-string parameter shadowing a reserved key");
                continue;
            }
            self.params.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn build(self) -> BTreeMap<String, String> {
        self.params
    }
}

/// Strip serde_json's position suffix (` at line N column M`) from a parse
/// error so the message only describes what was wrong.
pub fn sanitize_json_error(err: &serde_json::Error) -> String {
    let message = err.to_string();
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message,
    }
}

/// Parse a webhook body, mapping failures to a sanitized
/// [`AdapterFailure::MalformedJson`].
pub fn parse_body(vendor: &str, body: &str) -> Result<Value, AdapterFailure> {
    serde_json::from_str(body).map_err(|e| AdapterFailure::MalformedJson {
        vendor: vendor.to_string(),
        diagnostic: sanitize_json_error(&e),
    })
}

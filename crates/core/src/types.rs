use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Vendor and version of the API a payload was posted to, e.g.
/// `com.marketo` / `v1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectorApi {
    pub vendor: String,
    pub version: String,
}

impl CollectorApi {
    pub fn new(vendor: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            version: version.into(),
        }
    }
}

/// Which collector produced the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorSource {
    pub name: String,
    pub encoding: String,
    #[serde(default)]
    pub hostname: Option<String>,
}

/// Request metadata captured by the collector alongside the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorContext {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub useragent: Option<String>,
    #[serde(default)]
    pub referer_uri: Option<String>,
    /// Raw `Name: value` header lines forwarded by the collector.
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// Inbound webhook envelope as handed over by the collector front-end.
///
/// `body` and `content_type` are independently optional: a payload without a
/// body is valid to construct and is rejected later by the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorPayload {
    pub api: CollectorApi,
    /// Query-string parameters in request order.
    #[serde(default)]
    pub querystring: Vec<(String, String)>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    pub source: CollectorSource,
    #[serde(default)]
    pub context: CollectorContext,
}

/// Semantic version of a schema, rendered as `MODEL-REVISION-ADDITION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaVer {
    pub model: u32,
    pub revision: u32,
    pub addition: u32,
}

impl SchemaVer {
    pub const fn new(model: u32, revision: u32, addition: u32) -> Self {
        Self {
            model,
            revision,
            addition,
        }
    }
}

impl fmt::Display for SchemaVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.model, self.revision, self.addition)
    }
}

/// Four-part schema identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaKey {
    pub vendor: String,
    pub name: String,
    pub format: String,
    pub version: SchemaVer,
}

impl SchemaKey {
    pub fn new(
        vendor: impl Into<String>,
        name: impl Into<String>,
        format: impl Into<String>,
        version: SchemaVer,
    ) -> Self {
        Self {
            vendor: vendor.into(),
            name: name.into(),
            format: format.into(),
            version,
        }
    }

    /// URI form used as a schema reference, e.g.
    /// `iglu:com.marketo/event/jsonschema/2-0-0`.
    pub fn to_schema_uri(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SchemaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "iglu:{}/{}/{}/{}",
            self.vendor, self.name, self.format, self.version
        )
    }
}

/// Canonical event produced by an adapter and handed to enrichment.
///
/// Built once per payload and never mutated; fields are exposed through
/// accessors only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawEvent {
    api: CollectorApi,
    parameters: BTreeMap<String, String>,
    content_type: Option<String>,
    source: CollectorSource,
    context: CollectorContext,
}

impl RawEvent {
    /// Build an event carrying the payload's identity, provenance and
    /// context alongside the flattened event parameters.
    pub fn from_payload(payload: &CollectorPayload, parameters: BTreeMap<String, String>) -> Self {
        Self {
            api: payload.api.clone(),
            parameters,
            content_type: payload.content_type.clone(),
            source: payload.source.clone(),
            context: payload.context.clone(),
        }
    }

    pub fn api(&self) -> &CollectorApi {
        &self.api
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn source(&self) -> &CollectorSource {
        &self.source
    }

    pub fn context(&self) -> &CollectorContext {
        &self.context
    }
}

//! Static event-type → schema URI catalogs and the schema resolver seam.

use std::collections::HashMap;

use tracker_core::{AdapterFailure, SchemaKey, SchemaVer};

/// Envelope schema wrapping every unstructured event's self-describing data.
pub fn unstruct_event_schema() -> SchemaKey {
    SchemaKey::new(
        "com.snowplowanalytics.snowplow",
        "unstruct_event",
        "jsonschema",
        SchemaVer::new(1, 0, 0),
    )
}

/// Read-only mapping from a logical event type to a schema URI.
///
/// Built once and shared by reference; lookups never mutate it.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    schemas: HashMap<String, String>,
}

impl SchemaCatalog {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, SchemaKey)>,
        S: Into<String>,
    {
        Self {
            schemas: entries
                .into_iter()
                .map(|(event_type, key)| (event_type.into(), key.to_schema_uri()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn contains(&self, event_type: &str) -> bool {
        self.schemas.contains_key(event_type)
    }

    /// Resolve `event_type` for `vendor`.
    ///
    /// Fails with [`AdapterFailure::UnsupportedEventType`] when the type is
    /// absent or unknown.
    pub fn resolve(&self, event_type: Option<&str>, vendor: &str) -> Result<&str, AdapterFailure> {
        let unsupported = || AdapterFailure::UnsupportedEventType {
            vendor: vendor.to_string(),
            event_type: event_type.map(str::to_string),
        };

        let event_type = event_type.ok_or_else(unsupported)?;
        self.schemas
            .get(event_type)
            .map(String::as_str)
            .ok_or_else(unsupported)
    }
}

/// Schema registry capability passed to every adapter invocation.
///
/// Adapters that only build schema URIs never call it; variants performing
/// live validation use it to confirm a schema exists.
pub trait SchemaResolver: Send + Sync {
    fn lookup(&self, key: &SchemaKey) -> Result<(), String>;
}

/// Accepts every schema key.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveResolver;

impl SchemaResolver for PermissiveResolver {
    fn lookup(&self, _key: &SchemaKey) -> Result<(), String> {
        Ok(())
    }
}

/// Accepts only the schema keys it was built with.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    known: Vec<SchemaKey>,
}

impl StaticResolver {
    pub fn new(known: Vec<SchemaKey>) -> Self {
        Self { known }
    }
}

impl SchemaResolver for StaticResolver {
    fn lookup(&self, key: &SchemaKey) -> Result<(), String> {
        if self.known.contains(key) {
            Ok(())
        } else {
            Err(format!("schema {key} not found in registry"))
        }
    }
}

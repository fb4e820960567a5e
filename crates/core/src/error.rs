use thiserror::Error;

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Infrastructure errors raised outside the adapter boundary (config loading,
/// reading payload files). Adapters never return these.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons an adapter could not turn a collector payload into raw events.
///
/// Every variant renders as the human-readable message reported downstream;
/// adapters collect these into an outcome instead of returning early across
/// a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterFailure {
    #[error("Request body is empty: no {vendor} event to process")]
    EmptyBody { vendor: String },

    #[error("{vendor} event failed to parse into JSON: [{diagnostic}]")]
    MalformedJson { vendor: String, diagnostic: String },

    #[error("{vendor} event failed: {}", unsupported_type_reason(.event_type))]
    UnsupportedEventType {
        vendor: String,
        event_type: Option<String>,
    },

    #[error("Field [{field}]: [{value}] could not be parsed as a date: {reason}")]
    DateParseFailure {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Payload with vendor {vendor} and version {version} not supported")]
    UnsupportedVendor { vendor: String, version: String },

    #[error("no events to process")]
    NoEvents,
}

fn unsupported_type_reason(event_type: &Option<String>) -> String {
    match event_type {
        Some(et) => format!("type parameter [{et}] not recognized"),
        None => "type parameter not provided - cannot determine event type".to_string(),
    }
}

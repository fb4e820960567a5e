//! Shared data model for vendor webhook ingestion — collector payloads,
//! schema keys, raw events, adapter failures and configuration.

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AdapterFailure, TrackerError, TrackerResult};
pub use types::{
    CollectorApi, CollectorContext, CollectorPayload, CollectorSource, RawEvent, SchemaKey,
    SchemaVer,
};

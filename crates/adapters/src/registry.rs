//! Adapter registry — dispatches a payload to the adapter registered for its
//! API vendor and version.

use std::collections::HashMap;

use tracing::{info, warn};
use tracker_core::config::AdaptersConfig;
use tracker_core::{AdapterFailure, CollectorPayload};

use crate::outcome::AdapterOutcome;
use crate::schema::SchemaResolver;
use crate::vendors::marketo::MarketoAdapter;
use crate::vendors::EventAdapter;

/// Read-only after construction; share it across request handlers.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: HashMap<(String, String), Box<dyn EventAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every adapter enabled in `config`.
    pub fn from_config(config: &AdaptersConfig) -> Self {
        let mut registry = Self::new();
        if config.marketo_enabled {
            registry.register(Box::new(MarketoAdapter::new()));
        }
        info!(adapters = registry.len(), "adapter registry built");
        registry
    }

    /// Register an adapter, replacing any previous one for the same
    /// vendor/version.
    pub fn register(&mut self, adapter: Box<dyn EventAdapter>) {
        let key = (adapter.vendor().to_string(), adapter.version().to_string());
        if self.adapters.insert(key, adapter).is_some() {
            warn!("replaced previously registered adapter");
        }
    }

    pub fn get(&self, vendor: &str, version: &str) -> Option<&dyn EventAdapter> {
        self.adapters
            .get(&(vendor.to_string(), version.to_string()))
            .map(|adapter| adapter.as_ref())
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Route `payload` to its adapter.
    pub fn to_raw_events(
        &self,
        payload: &CollectorPayload,
        resolver: &dyn SchemaResolver,
    ) -> AdapterOutcome {
        let api = &payload.api;
        match self.get(&api.vendor, &api.version) {
            Some(adapter) => adapter.to_raw_events(payload, resolver),
            None => {
                warn!(vendor = %api.vendor, version = %api.version, "no adapter for payload");
                AdapterOutcome::failure(AdapterFailure::UnsupportedVendor {
                    vendor: api.vendor.clone(),
                    version: api.version.clone(),
                })
            }
        }
    }
}

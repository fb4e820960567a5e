use serde::Deserialize;

use crate::error::TrackerResult;

/// Root application configuration. Loaded from environment variables
/// with the prefix `TRACKER__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub adapters: AdaptersConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which vendor adapters are registered at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AdaptersConfig {
    #[serde(default = "default_marketo_enabled")]
    pub marketo_enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

// Default functions
fn default_node_id() -> String {
    "collector-01".to_string()
}
fn default_marketo_enabled() -> bool {
    true
}
fn default_pretty() -> bool {
    false
}

impl Default for AdaptersConfig {
    fn default() -> Self {
        Self {
            marketo_enabled: default_marketo_enabled(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            adapters: AdaptersConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> TrackerResult<Self> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("TRACKER")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}

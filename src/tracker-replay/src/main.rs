//! Tracker Replay — runs a captured collector payload through the vendor
//! adapters and prints the resulting outcome.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracker_adapters::{AdapterRegistry, PermissiveResolver};
use tracker_core::config::AppConfig;
use tracker_core::{CollectorPayload, TrackerResult};

#[derive(Parser, Debug)]
#[command(name = "tracker-replay")]
#[command(about = "Replay a collector payload through the vendor webhook adapters")]
#[command(version)]
struct Cli {
    /// CollectorPayload JSON file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Pretty-print the outcome
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Node identifier (overrides config)
    #[arg(long, env = "TRACKER__NODE_ID")]
    node_id: Option<String>,
}

fn read_payload(input: Option<&PathBuf>) -> TrackerResult<CollectorPayload> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&raw)?)
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout carries only the outcome
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracker_replay=info,tracker_adapters=info".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    if cli.pretty {
        config.output.pretty = true;
    }
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }

    info!(
        node_id = %config.node_id,
        marketo_enabled = config.adapters.marketo_enabled,
        "Configuration loaded"
    );

    let registry = AdapterRegistry::from_config(&config.adapters);
    let payload = read_payload(cli.input.as_ref()).context("reading collector payload")?;

    let outcome = registry.to_raw_events(&payload, &PermissiveResolver);
    if outcome.is_success() {
        info!(vendor = %payload.api.vendor, "payload adapted");
    } else {
        warn!(
            vendor = %payload.api.vendor,
            reasons = ?outcome.messages(),
            "payload rejected"
        );
    }

    let rendered = if config.output.pretty {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string(&outcome)?
    };
    println!("{rendered}");

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

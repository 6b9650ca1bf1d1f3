//! Parlay Explorer
//!
//! Entry point. Loads configuration, initialises structured logging,
//! prints the default parlay for the configured bet source, and serves
//! the explorer page until Ctrl+C.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use parlay_explorer::config::AppConfig;
use parlay_explorer::dashboard::{self, ExplorerDefaults, ExplorerState};
use parlay_explorer::data;

const BANNER: &str = r#"
  ___          _
 | _ \__ _ _ _| |__ _ _  _
 |  _/ _` | '_| / _` | || |
 |_| \__,_|_| |_\__,_|\_, |
                      |__/   Explorer v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let config_path = AppConfig::resolve_path();
    let cfg = if Path::new(&config_path).exists() {
        AppConfig::load(&config_path)?
    } else {
        warn!(path = %config_path, "Config file not found, using defaults");
        AppConfig::default()
    };

    println!("{BANNER}");
    info!(
        legs = cfg.explorer.leg_count,
        mode = %cfg.explorer.parlay_mode,
        source = ?cfg.source.kind,
        "Parlay Explorer starting up"
    );

    let source = data::from_config(&cfg.source)?;
    let state = Arc::new(ExplorerState::new(source, ExplorerDefaults::from(&cfg.explorer)));

    if let Some(summary) = dashboard::startup_summary(&state).await {
        print!("{summary}");
    }

    if !cfg.dashboard.enabled {
        info!("Dashboard disabled; exiting.");
        return Ok(());
    }

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received.");
        }
    };

    info!("Serving explorer. Press Ctrl+C to stop.");
    dashboard::serve(state, cfg.dashboard.port, shutdown).await?;

    info!("Parlay Explorer shut down cleanly.");
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("parlay_explorer=info"));

    let json_logging = std::env::var("EXPLORER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}

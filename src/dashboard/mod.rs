//! Dashboard: Axum web server for the bet explorer page.
//!
//! Serves a REST API and a self-contained HTML page.
//! CORS enabled for local development.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    response::Html,
    routing::get,
    Router,
};
use std::fmt::Write as _;
use std::future::Future;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::parlay::{self, QuoteRequest};

pub use routes::{AppState, ExplorerDefaults, ExplorerState};

/// The embedded explorer page (compiled into the binary).
const EXPLORER_HTML: &str = include_str!("templates/index.html");

/// Console summary of the configured default parlay.
///
/// A failing source or an unpriceable pool is logged and yields `None`;
/// the server still starts and reports the same problem per request.
pub async fn startup_summary(state: &ExplorerState) -> Option<String> {
    match render_summary(state).await {
        Ok(summary) => Some(summary),
        Err(e) => {
            warn!(
                source = state.source.name(),
                error = %format!("{e:#}"),
                "Default parlay unavailable at startup; serving anyway"
            );
            None
        }
    }
}

async fn render_summary(state: &ExplorerState) -> Result<String> {
    let defaults = &state.defaults;
    let pool = state.source.fetch_candidate_bets().await?;
    info!(source = state.source.name(), count = pool.len(), "Candidate bets fetched");

    let request = QuoteRequest {
        leg_count: defaults.leg_count,
        mode: defaults.mode,
        stake: parlay::parse_stake(&defaults.stake),
    };
    let quote = parlay::quote(&pool, &request)?;

    let mut out = String::new();
    writeln!(out, "Highest Payout Parlay ({}, {} legs)", quote.mode, quote.legs.len())?;
    for leg in &quote.legs {
        writeln!(out, "  {leg}")?;
        writeln!(out, "      {}", leg.commence_label())?;
    }
    writeln!(out, "Total Odds: {} ({:.4})", quote.combined_american, quote.combined_decimal)?;
    if !defaults.stake.trim().is_empty() {
        writeln!(
            out,
            "Potential Winnings on ${}: ${}",
            parlay::format_money(quote.stake),
            quote.winnings_display
        )?;
    }
    Ok(out)
}

/// Serve the dashboard until `shutdown` resolves.
pub async fn serve<F>(state: AppState, port: u16, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind dashboard port {port}"))?;
    info!(port, "Dashboard server listening on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Dashboard server error")
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // API routes
        .route("/api/bets", get(routes::get_bets))
        .route("/api/parlay", get(routes::get_parlay))
        .route("/health", get(routes::health))
        // Explorer page
        .route("/", get(serve_explorer))
        .layer(cors)
        .with_state(state)
}

/// Serve the embedded HTML page.
async fn serve_explorer() -> Html<&'static str> {
    Html(EXPLORER_HTML)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

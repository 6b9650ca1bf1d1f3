//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<ExplorerState>`.
//! Each request fetches a fresh pool and recomputes from scratch.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ExplorerConfig;
use crate::data::BetSource;
use crate::parlay::{self, ParlayQuote, QuoteRequest};
use crate::types::{Bet, ExplorerError, ParlayMode};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Values used when a request leaves a parameter out.
#[derive(Debug, Clone)]
pub struct ExplorerDefaults {
    pub leg_count: usize,
    pub mode: ParlayMode,
    pub stake: String,
}

impl From<&ExplorerConfig> for ExplorerDefaults {
    fn from(cfg: &ExplorerConfig) -> Self {
        Self {
            leg_count: cfg.leg_count,
            mode: cfg.parlay_mode,
            stake: cfg.default_stake.clone(),
        }
    }
}

impl Default for ExplorerDefaults {
    fn default() -> Self {
        Self::from(&ExplorerConfig::default())
    }
}

/// Shared state accessible by all route handlers.
pub struct ExplorerState {
    pub source: Box<dyn BetSource>,
    pub defaults: ExplorerDefaults,
}

impl ExplorerState {
    pub fn new(source: Box<dyn BetSource>, defaults: ExplorerDefaults) -> Self {
        Self { source, defaults }
    }
}

pub type AppState = Arc<ExplorerState>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query string for `GET /api/parlay`.
#[derive(Debug, Default, Deserialize)]
pub struct ParlayParams {
    /// Raw text so a bad value still gets the JSON error body.
    pub legs: Option<String>,
    /// Raw user text; bad input prices as a zero stake.
    pub stake: Option<String>,
    pub mode: Option<String>,
}

/// One bet as the page renders it.
#[derive(Debug, Clone, Serialize)]
pub struct BetView {
    pub id: u32,
    pub game: String,
    pub description: String,
    pub american_odds: String,
    pub decimal_odds: f64,
    pub commence_time: DateTime<Utc>,
    pub commence_label: String,
    pub streak: Option<u32>,
    pub streak_label: Option<String>,
}

impl From<&Bet> for BetView {
    fn from(bet: &Bet) -> Self {
        Self {
            id: bet.id,
            game: bet.game.clone(),
            description: bet.description.clone(),
            american_odds: bet.american_odds.to_string(),
            decimal_odds: bet.decimal_odds(),
            commence_time: bet.commence_time,
            commence_label: bet.commence_label(),
            streak: bet.streak,
            streak_label: bet.streak_label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParlayResponse {
    pub mode: ParlayMode,
    pub mode_label: String,
    pub legs: Vec<BetView>,
    pub combined_decimal: f64,
    pub combined_american: String,
    pub implied_probability: f64,
    pub stake: f64,
    pub potential_winnings: f64,
    pub total_return: f64,
    pub winnings_display: String,
    pub total_return_display: String,
}

impl From<ParlayQuote> for ParlayResponse {
    fn from(q: ParlayQuote) -> Self {
        Self {
            mode: q.mode,
            mode_label: q.mode.to_string(),
            legs: q.legs.iter().map(BetView::from).collect(),
            combined_decimal: q.combined_decimal,
            combined_american: q.combined_american,
            implied_probability: q.implied_probability,
            stake: q.stake,
            potential_winnings: q.potential_winnings,
            total_return: q.total_return,
            winnings_display: q.winnings_display,
            total_return_display: q.total_return_display,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler error mapped to an HTTP status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// The bet source could not produce a pool.
    fn upstream(source_name: &str, err: anyhow::Error) -> Self {
        let wrapped = ExplorerError::DataSource {
            source_name: source_name.to_string(),
            message: format!("{err:#}"),
        };
        warn!(error = %wrapped, "Bet source failed");
        Self { status: StatusCode::BAD_GATEWAY, message: wrapped.to_string() }
    }
}

impl ApiError {
    fn invalid_legs(raw: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: format!("Invalid leg count: {raw:?} is not a whole number"),
        }
    }
}

impl From<ExplorerError> for ApiError {
    fn from(err: ExplorerError) -> Self {
        let status = match err {
            ExplorerError::DataSource { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self { status, message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// Blank falls back to the configured default.
fn parse_legs(raw: Option<&str>, default: usize) -> Result<usize, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(text) => text.parse().map_err(|_| ApiError::invalid_legs(text)),
    }
}

async fn fetch_pool(state: &ExplorerState) -> Result<Vec<Bet>, ApiError> {
    let source = &state.source;
    source
        .fetch_candidate_bets()
        .await
        .map_err(|e| ApiError::upstream(source.name(), e))
}

/// GET /api/bets
pub async fn get_bets(State(state): State<AppState>) -> Result<Json<Vec<BetView>>, ApiError> {
    let pool = fetch_pool(&state).await?;
    Ok(Json(pool.iter().map(BetView::from).collect()))
}

/// GET /api/parlay?legs=3&stake=10&mode=multiple
pub async fn get_parlay(
    State(state): State<AppState>,
    Query(params): Query<ParlayParams>,
) -> Result<Json<ParlayResponse>, ApiError> {
    let defaults = &state.defaults;
    let mode = match params.mode.as_deref() {
        Some(raw) => raw.parse::<ParlayMode>()?,
        None => defaults.mode,
    };
    let request = QuoteRequest {
        leg_count: parse_legs(params.legs.as_deref(), defaults.leg_count)?,
        mode,
        stake: parlay::parse_stake(params.stake.as_deref().unwrap_or(defaults.stake.as_str())),
    };

    let pool = fetch_pool(&state).await?;
    let quote = parlay::quote(&pool, &request)?;

    info!(
        source = state.source.name(),
        legs = quote.legs.len(),
        mode = %quote.mode,
        american = %quote.combined_american,
        winnings = %quote.winnings_display,
        "Parlay quoted"
    );

    Ok(Json(ParlayResponse::from(quote)))
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

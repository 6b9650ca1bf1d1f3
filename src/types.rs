//! Shared types for the bet explorer.
//!
//! These types form the data model used across all modules. The odds
//! engine, bet sources, and dashboard all depend on them, never on
//! each other's internals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Odds
// ---------------------------------------------------------------------------

/// American odds notation: signed and never zero.
///
/// Positive values are the profit on a $100 stake, negative values the
/// stake needed to profit $100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct AmericanOdds(i32);

impl AmericanOdds {
    pub fn new(value: i32) -> Result<Self, ExplorerError> {
        if value == 0 {
            return Err(ExplorerError::InvalidOdds(
                "american odds cannot be zero".to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// Decimal multiplier. Infallible since zero is unrepresentable.
    pub fn to_decimal(&self) -> f64 {
        if self.0 > 0 {
            self.0 as f64 / 100.0 + 1.0
        } else {
            100.0 / (self.0 as f64).abs() + 1.0
        }
    }
}

impl TryFrom<i32> for AmericanOdds {
    type Error = ExplorerError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AmericanOdds> for i32 {
    fn from(odds: AmericanOdds) -> Self {
        odds.0
    }
}

impl fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

/// Parse `"+140"`, `"140"`, or `"-115"`.
impl std::str::FromStr for AmericanOdds {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i32 = trimmed
            .strip_prefix('+')
            .unwrap_or(trimmed)
            .parse()
            .map_err(|_| ExplorerError::InvalidOdds(format!("not american odds: {s:?}")))?;
        Self::new(value)
    }
}

// ---------------------------------------------------------------------------
// Bet
// ---------------------------------------------------------------------------

/// One wagering opportunity in the candidate pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub id: u32,
    /// Matchup label, e.g. "Packers vs Bears".
    pub game: String,
    /// The specific proposition being wagered on.
    pub description: String,
    pub american_odds: AmericanOdds,
    pub commence_time: DateTime<Utc>,
    /// Consecutive weeks this pick has hit. Display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
}

impl Bet {
    pub fn decimal_odds(&self) -> f64 {
        self.american_odds.to_decimal()
    }

    /// Start time the way the explorer page shows it: `Sun, Sep 10, 8:00 PM UTC`.
    pub fn commence_label(&self) -> String {
        self.commence_time.format("%a, %b %-d, %-I:%M %p UTC").to_string()
    }

    pub fn streak_label(&self) -> Option<String> {
        self.streak.map(|n| format!("x{n}"))
    }
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {} ({})", self.id, self.game, self.description, self.american_odds)?;
        if let Some(streak) = self.streak_label() {
            write!(f, " 🔥{streak}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Parlay
// ---------------------------------------------------------------------------

/// Which kind of parlay the user asked for.
///
/// Accepted and echoed back; both modes currently price identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParlayMode {
    #[default]
    #[serde(rename = "multiple")]
    MultipleGame,
    #[serde(rename = "same")]
    SameGame,
}

impl fmt::Display for ParlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParlayMode::MultipleGame => write!(f, "Multiple Game Parlay"),
            ParlayMode::SameGame => write!(f, "Same Game Parlay"),
        }
    }
}

impl std::str::FromStr for ParlayMode {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "multiple" | "multiple_game" | "multi" => Ok(ParlayMode::MultipleGame),
            "same" | "same_game" | "sgp" => Ok(ParlayMode::SameGame),
            other => Err(ExplorerError::Config(format!("unknown parlay mode: {other}"))),
        }
    }
}

/// An ordered, non-empty selection of legs and their combined decimal odds.
///
/// Derived on demand; never stored or mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parlay {
    pub legs: Vec<Bet>,
    pub combined_odds: f64,
}

impl Parlay {
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Combined odds in American notation, e.g. `+884`.
    pub fn american_odds(&self) -> Result<String, ExplorerError> {
        crate::odds::decimal_to_american(self.combined_odds)
    }

    /// Probability that every leg wins, as priced by the book.
    pub fn implied_probability(&self) -> Result<f64, ExplorerError> {
        crate::odds::implied_probability(self.combined_odds)
    }
}

impl fmt::Display for Parlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let american = self.american_odds().unwrap_or_else(|_| "n/a".to_string());
        write!(
            f,
            "{}-leg parlay @ {:.4} ({american})",
            self.legs.len(),
            self.combined_odds,
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the explorer.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error("Invalid odds: {0}")]
    InvalidOdds(String),

    #[error("Invalid stake: {0}")]
    InvalidStake(String),

    #[error("Cannot build a parlay from an empty bet pool")]
    EmptyPool,

    #[error("Invalid leg count: {0} (must be at least 1)")]
    InvalidLegCount(usize),

    #[error("Bet source error ({source_name}): {message}")]
    DataSource { source_name: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

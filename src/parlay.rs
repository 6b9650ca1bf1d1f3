//! Parlay composition and payout math.
//!
//! Ranks candidate bets by decimal odds, multiplies the top N into a
//! combined price, and estimates net winnings for a stake. Every function
//! here is pure: callers re-invoke on any change to pool, leg count, or stake.

use rust_decimal::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::types::{Bet, ExplorerError, Parlay, ParlayMode};

// ---------------------------------------------------------------------------
// Leg selection
// ---------------------------------------------------------------------------

/// The `count` highest-paying bets, best first.
///
/// Ties keep their pool order. Returns the whole pool (sorted) when
/// `count` exceeds it. The pool itself is left untouched.
pub fn select_top_legs(pool: &[Bet], count: usize) -> Vec<Bet> {
    let mut ranked: Vec<&Bet> = pool.iter().collect();
    // sort_by is stable, which is what keeps ties in pool order
    ranked.sort_by(|a, b| b.decimal_odds().total_cmp(&a.decimal_odds()));

    ranked.into_iter().take(count).cloned().collect()
}

/// Product of each leg's decimal odds. No legs means no multiplier (`1.0`).
pub fn combined_odds(legs: &[Bet]) -> f64 {
    legs.iter().map(Bet::decimal_odds).product()
}

/// Rank the pool and combine the top `leg_count` bets.
pub fn build_parlay(pool: &[Bet], leg_count: usize) -> Result<Parlay, ExplorerError> {
    if pool.is_empty() {
        return Err(ExplorerError::EmptyPool);
    }
    if leg_count == 0 {
        return Err(ExplorerError::InvalidLegCount(leg_count));
    }

    let legs = select_top_legs(pool, leg_count);
    let combined = combined_odds(&legs);

    debug!(
        pool_size = pool.len(),
        requested = leg_count,
        selected = legs.len(),
        combined_odds = format!("{combined:.4}"),
        "Parlay built"
    );

    Ok(Parlay { legs, combined_odds: combined })
}

// ---------------------------------------------------------------------------
// Stake & payout
// ---------------------------------------------------------------------------

/// Net profit on a winning parlay (returned principal excluded).
///
/// A stake that is negative or not finite counts as no stake.
pub fn potential_winnings(stake: f64, combined_decimal_odds: f64) -> f64 {
    if !stake.is_finite() || stake <= 0.0 {
        return 0.0;
    }
    stake * combined_decimal_odds - stake
}

/// Parse a user-entered stake, rejecting anything that is not a
/// non-negative finite amount. Thousands separators are allowed.
pub fn try_parse_stake(input: &str) -> Result<f64, ExplorerError> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    let stake: f64 = cleaned
        .parse()
        .map_err(|_| ExplorerError::InvalidStake(format!("not a number: {input:?}")))?;

    if !stake.is_finite() {
        return Err(ExplorerError::InvalidStake(format!("not finite: {input:?}")));
    }
    if stake < 0.0 {
        return Err(ExplorerError::InvalidStake(format!("negative: {input:?}")));
    }
    Ok(stake)
}

/// Lenient stake parsing: invalid input becomes `0.0`.
pub fn parse_stake(input: &str) -> f64 {
    match try_parse_stake(input) {
        Ok(stake) => stake,
        Err(e) => {
            debug!(error = %e, "Stake treated as zero");
            0.0
        }
    }
}

/// Two fractional digits with `,` grouping: `1234.5` → `"1,234.50"`.
pub fn format_money(amount: f64) -> String {
    let fixed = match Decimal::from_f64(amount) {
        Some(d) => format!(
            "{:.2}",
            d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        // Beyond Decimal's range; cents are noise at this magnitude
        None if amount.is_finite() => format!("{amount:.2}"),
        None => return "0.00".to_string(),
    };

    let digits = fixed.trim_start_matches('-');
    let negative = fixed.starts_with('-') && digits.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let (whole, frac) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

// ---------------------------------------------------------------------------
// Quote
// ---------------------------------------------------------------------------

/// Everything the caller picked for one computation.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub leg_count: usize,
    pub mode: ParlayMode,
    pub stake: f64,
}

/// A priced parlay plus payout, ready for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct ParlayQuote {
    pub mode: ParlayMode,
    pub legs: Vec<Bet>,
    pub combined_decimal: f64,
    pub combined_american: String,
    pub implied_probability: f64,
    pub stake: f64,
    pub potential_winnings: f64,
    pub total_return: f64,
    pub winnings_display: String,
    pub total_return_display: String,
}

/// Price the best parlay in `pool` for the given request.
pub fn quote(pool: &[Bet], request: &QuoteRequest) -> Result<ParlayQuote, ExplorerError> {
    let parlay = build_parlay(pool, request.leg_count)?;
    let combined_american = parlay.american_odds()?;
    let implied_probability = parlay.implied_probability()?;

    let stake = if request.stake.is_finite() && request.stake > 0.0 { request.stake } else { 0.0 };
    let winnings = potential_winnings(stake, parlay.combined_odds);
    let total_return = stake + winnings;

    debug!(
        mode = %request.mode,
        legs = parlay.leg_count(),
        american = %combined_american,
        stake,
        winnings = format!("{winnings:.2}"),
        "Quote computed"
    );

    Ok(ParlayQuote {
        mode: request.mode,
        combined_decimal: parlay.combined_odds,
        combined_american,
        implied_probability,
        stake,
        potential_winnings: winnings,
        total_return,
        winnings_display: format_money(winnings),
        total_return_display: format_money(total_return),
        legs: parlay.legs,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

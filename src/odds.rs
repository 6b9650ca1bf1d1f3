//! Odds notation conversions.
//!
//! American odds are what books quote; decimal odds are what the parlay
//! math multiplies. Conversion back to American is lossy (integer rounding).

use crate::types::ExplorerError;

/// Convert American odds to a decimal multiplier.
///
/// `+140` → `2.40`, `-115` → `1.8696`. Always `> 1.0`.
pub fn american_to_decimal(american: i32) -> Result<f64, ExplorerError> {
    match american {
        0 => Err(ExplorerError::InvalidOdds(
            "american odds cannot be zero".to_string(),
        )),
        a if a > 0 => Ok(a as f64 / 100.0 + 1.0),
        a => Ok(100.0 / (a as f64).abs() + 1.0),
    }
}

/// Convert decimal odds to a signed American label, e.g. `"+884"` or `"-115"`.
///
/// Rounds half away from zero. Even money (`2.0`) reads as `+100`.
pub fn decimal_to_american(decimal: f64) -> Result<String, ExplorerError> {
    if !decimal.is_finite() || decimal <= 1.0 {
        return Err(ExplorerError::InvalidOdds(format!(
            "decimal odds must be greater than 1.0, got {decimal}"
        )));
    }

    if decimal >= 2.0 {
        Ok(format!("+{}", ((decimal - 1.0) * 100.0).round() as i64))
    } else {
        Ok(format!("-{}", (100.0 / (decimal - 1.0)).round() as i64))
    }
}

/// Break-even probability implied by decimal odds (no vig removal).
pub fn implied_probability(decimal: f64) -> Result<f64, ExplorerError> {
    if !decimal.is_finite() || decimal <= 1.0 {
        return Err(ExplorerError::InvalidOdds(format!(
            "decimal odds must be greater than 1.0, got {decimal}"
        )));
    }
    Ok(1.0 / decimal)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

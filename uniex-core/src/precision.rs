//! Precision formatting for prices and amounts.
//!
//! Markets declare precision either as a fractional-digit count or as a
//! minimum tick/step size. This module formats `Decimal` values against both
//! forms and derives digit counts from step strings for catalogs that only
//! publish steps.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Error, Result};

/// Rounding behavior when reducing a value to a target precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round to nearest, ties away from zero.
    Round,
    /// Round away from zero.
    RoundUp,
    /// Round toward zero (truncate). The safe default for order amounts,
    /// which must never exceed what the caller asked for.
    RoundDown,
}

/// Output padding behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingMode {
    /// Strip trailing fractional zeros.
    NoPadding,
    /// Pad with zeros out to the full precision (`500` at 2 places →
    /// `"500.00"`).
    PadWithZero,
}

/// Format a value to a fixed number of fractional digits.
///
/// Negative `places` round to powers of ten (`-1` → nearest 10).
///
/// # Examples
///
/// ```
/// use uniex_core::precision::{decimal_to_precision, PaddingMode, RoundingMode};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     decimal_to_precision(dec!(123.456), RoundingMode::Round, 2, PaddingMode::NoPadding),
///     "123.46"
/// );
/// assert_eq!(
///     decimal_to_precision(dec!(500), RoundingMode::RoundDown, 2, PaddingMode::PadWithZero),
///     "500.00"
/// );
/// ```
pub fn decimal_to_precision(
    value: Decimal,
    rounding: RoundingMode,
    places: i32,
    padding: PaddingMode,
) -> String {
    let rounded = round_to_places(value, places, rounding);
    match padding {
        PaddingMode::NoPadding => strip_trailing_zeros(&rounded.to_string()),
        PaddingMode::PadWithZero => {
            if places > 0 {
                format!("{rounded:.prec$}", prec = places as usize)
            } else {
                rounded.trunc().to_string()
            }
        }
    }
}

/// Snap a value onto a tick-size grid.
///
/// # Errors
///
/// [`Error::Arithmetic`] when `tick` is not strictly positive.
pub fn round_to_tick(value: Decimal, tick: Decimal, rounding: RoundingMode) -> Result<Decimal> {
    if tick <= Decimal::ZERO {
        return Err(Error::arithmetic("tick size must be positive"));
    }
    let ticks = match rounding {
        RoundingMode::Round => {
            (value / tick).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        }
        RoundingMode::RoundUp => (value / tick).ceil(),
        RoundingMode::RoundDown => (value / tick).floor(),
    };
    Ok((ticks * tick).normalize())
}

/// Fractional digits implied by a step/tick string after reduction.
///
/// # Examples
///
/// ```
/// use uniex_core::precision::precision_from_string;
///
/// assert_eq!(precision_from_string("0.001"), 3);
/// assert_eq!(precision_from_string("0.0100"), 2);
/// assert_eq!(precision_from_string("1e-8"), 8);
/// assert_eq!(precision_from_string("10"), 0);
/// ```
pub fn precision_from_string(s: &str) -> u32 {
    if let Some(e_pos) = s.find(['e', 'E']) {
        if let Ok(exp) = s[e_pos + 1..].parse::<i32>() {
            return (-exp).max(0) as u32;
        }
    }
    let trimmed = s.trim_end_matches('0');
    match trimmed.find('.') {
        Some(dot) => (trimmed.len() - dot - 1) as u32,
        None => 0,
    }
}

/// The stricter of an explicit digit count and a step-derived one.
///
/// Venues sometimes publish both a scale field and a minimum step; the
/// effective precision must never be coarser than the explicit scale.
pub fn stricter_precision(explicit: Option<u32>, step: Option<&str>) -> Option<u32> {
    let derived = step.map(precision_from_string);
    match (explicit, derived) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

/// Render a decimal without trailing fractional zeros or scientific notation.
pub fn number_to_string(value: Decimal) -> String {
    strip_trailing_zeros(&value.to_string())
}

fn strip_trailing_zeros(s: &str) -> String {
    let trimmed = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    };
    // Rounding a small negative to zero leaves a bare minus sign behind.
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn round_to_places(value: Decimal, places: i32, rounding: RoundingMode) -> Decimal {
    let scale = Decimal::from_i128_with_scale(10_i128.pow(places.unsigned_abs()), 0);
    // Positive places scale up before rounding, negative places scale down.
    let shifted = if places >= 0 {
        value * scale
    } else {
        value / scale
    };
    let strategy = match rounding {
        RoundingMode::Round => RoundingStrategy::MidpointAwayFromZero,
        RoundingMode::RoundUp => RoundingStrategy::AwayFromZero,
        RoundingMode::RoundDown => RoundingStrategy::ToZero,
    };
    let rounded = shifted.round_dp_with_strategy(0, strategy);
    if places >= 0 {
        rounded / scale
    } else {
        rounded * scale
    }
}

//! Clock-time parsing and elapsed duration.
//!
//! Shift times are wall-clock `HH:MM` strings with no date attached, so a
//! finish earlier than the start is read as running past midnight.

use chrono::{NaiveTime, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Decimal places elapsed durations are rounded to.
pub const DURATION_DECIMAL_PLACES: u32 = 2;

/// Parses an `HH:MM` 24-hour clock string into minutes past midnight.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimeFormat`] when the value has no colon,
/// non-numeric parts, or an hour/minute out of range.
///
/// # Example
///
/// ```
/// use quote_engine::calculation::parse_clock_minutes;
///
/// assert_eq!(parse_clock_minutes("08:30").unwrap(), 510);
/// assert!(parse_clock_minutes("0830").is_err());
/// ```
pub fn parse_clock_minutes(value: &str) -> EngineResult<i64> {
    let time = NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        EngineError::InvalidTimeFormat {
            value: value.to_string(),
        }
    })?;
    Ok(i64::from(time.hour()) * 60 + i64::from(time.minute()))
}

/// Returns the hours between two clock times, rounded to 2 decimal places.
///
/// When `finish` is earlier than `start` the shift wraps past midnight and
/// 24 hours are added. Equal times give zero, not a full day.
///
/// # Example
///
/// ```
/// use quote_engine::calculation::elapsed_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(elapsed_hours("08:00", "16:00").unwrap(), Decimal::new(8, 0));
/// assert_eq!(elapsed_hours("22:00", "06:00").unwrap(), Decimal::new(8, 0));
/// assert_eq!(elapsed_hours("08:20", "09:00").unwrap(), Decimal::new(67, 2));
/// ```
pub fn elapsed_hours(start: &str, finish: &str) -> EngineResult<Decimal> {
    let start_minutes = parse_clock_minutes(start)?;
    let finish_minutes = parse_clock_minutes(finish)?;

    let mut diff = finish_minutes - start_minutes;
    if diff < 0 {
        diff += MINUTES_PER_DAY;
    }

    let hours = Decimal::from(diff) / MINUTES_PER_HOUR;
    Ok(hours.round_dp_with_strategy(
        DURATION_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    ))
}

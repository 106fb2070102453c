//! Shift model and related types.
//!
//! This module defines the [`Shift`] record fed to the allocator and the
//! [`DayType`] classification that selects premium pricing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Longest travel leg, in hours, accepted on a shift.
pub const MAX_TRAVEL_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Classification of a shift's calendar context.
///
/// The day type selects which premium rate applies to overtime hours, and
/// any non-weekday classification forces every hour of the shift into
/// overtime.
///
/// # Example
///
/// ```
/// use quote_engine::models::DayType;
///
/// let day_type: DayType = serde_json::from_str("\"public_holiday\"").unwrap();
/// assert_eq!(day_type, DayType::PublicHoliday);
/// assert_eq!(day_type.to_string(), "publicHoliday");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday, normal/overtime split applies.
    #[default]
    Weekday,
    /// Saturday or Sunday, all hours at the weekend rate.
    Weekend,
    /// Gazetted public holiday, all hours at the public holiday rate.
    PublicHoliday,
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "weekday"),
            DayType::Weekend => write!(f, "weekend"),
            DayType::PublicHoliday => write!(f, "publicHoliday"),
        }
    }
}

/// A single work shift on a quote or invoice.
///
/// Times are wall-clock `HH:MM` strings on a 24-hour clock. A finish time
/// earlier than the start time means the shift runs past midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The calendar date of the shift (display only).
    pub date: NaiveDate,
    /// The calendar classification of the shift.
    #[serde(default)]
    pub day_type: DayType,
    /// Clock-on time, `HH:MM`.
    pub start_time: String,
    /// Clock-off time, `HH:MM`.
    pub finish_time: String,
    /// Hours spent travelling to site before work starts.
    #[serde(default)]
    pub travel_in: Decimal,
    /// Hours spent travelling home after work finishes.
    #[serde(default)]
    pub travel_out: Decimal,
    /// Forces every hour of the shift into overtime.
    #[serde(default)]
    pub is_night_shift: bool,
    /// Whether the flat vehicle allowance applies.
    #[serde(default)]
    pub vehicle: bool,
    /// Whether the flat per diem allowance applies.
    #[serde(default)]
    pub per_diem: bool,
    /// The technician assigned to the shift.
    #[serde(default)]
    pub tech: String,
}

impl Shift {
    /// Returns true when every hour of the shift is billed as overtime.
    ///
    /// Weekend and public holiday shifts, and any shift flagged as a night
    /// shift, skip the normal-time allocation entirely.
    pub fn is_full_overtime(&self) -> bool {
        self.is_night_shift || self.day_type != DayType::Weekday
    }

    /// Checks each travel duration lies between zero and
    /// [`MAX_TRAVEL_HOURS`].
    ///
    /// Travel exceeding the clock duration is not an error; the allocator
    /// clamps site hours to zero in that case.
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in [("travel_in", self.travel_in), ("travel_out", self.travel_out)] {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidShiftInput {
                    shift_id: self.id.clone(),
                    message: format!("{} must not be negative (got {})", field, value),
                });
            }
            if value > MAX_TRAVEL_HOURS {
                return Err(EngineError::InvalidShiftInput {
                    shift_id: self.id.clone(),
                    message: format!(
                        "{} must not exceed {} hours (got {})",
                        field, MAX_TRAVEL_HOURS, value
                    ),
                });
            }
        }
        Ok(())
    }
}

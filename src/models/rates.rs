//! Rate table model.
//!
//! A [`RateTable`] is a flat snapshot of the dollar rates used to price
//! every bucket of a shift and the flat per-shift allowances. It is read
//! from a key/value map so that a missing or misspelled key is reported as
//! [`EngineError::InvalidRateTable`] no matter where the table came from.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::DayType;

/// Rate keys the allocator cannot run without.
pub const REQUIRED_RATE_KEYS: [&str; 8] = [
    "site_normal",
    "site_overtime",
    "weekend",
    "public_holiday",
    "travel",
    "travel_overtime",
    "vehicle",
    "per_diem",
];

/// Rate keys consumed by quote aggregation. Missing entries default to zero.
pub const OPTIONAL_RATE_KEYS: [&str; 5] = [
    "office_reporting",
    "travel_charge",
    "travel_charge_ex_brisbane",
    "standard_day_rate",
    "weekend_day_rate",
];

/// The named set of rates used to price a shift.
///
/// # Example
///
/// ```
/// use quote_engine::models::{DayType, RateTable};
/// use rust_decimal::Decimal;
///
/// let rates: RateTable = serde_json::from_str(r#"{
///     "site_normal": 100, "site_overtime": 150, "weekend": 200,
///     "public_holiday": 250, "travel": 80, "travel_overtime": 100,
///     "vehicle": 50, "per_diem": 100
/// }"#).unwrap();
///
/// assert_eq!(rates.premium_rate(DayType::Weekend), Decimal::new(200, 0));
/// assert_eq!(rates.office_reporting, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, Decimal>")]
pub struct RateTable {
    /// Hourly rate for normal-time hours.
    pub site_normal: Decimal,
    /// Hourly rate for weekday overtime and night shifts.
    pub site_overtime: Decimal,
    /// Hourly rate for all weekend hours.
    pub weekend: Decimal,
    /// Hourly rate for all public holiday hours.
    pub public_holiday: Decimal,
    /// Hourly rate for normal-time travel under split travel pricing.
    pub travel: Decimal,
    /// Hourly rate for overtime travel under split travel pricing.
    pub travel_overtime: Decimal,
    /// Flat vehicle allowance per shift.
    pub vehicle: Decimal,
    /// Flat per diem per shift.
    pub per_diem: Decimal,
    /// Hourly rate for office reporting time on a quote.
    pub office_reporting: Decimal,
    /// Per-kilometre travel charge on a quote.
    pub travel_charge: Decimal,
    /// Flat surcharge added to the travel charge for out-of-area jobs.
    pub travel_charge_ex_brisbane: Decimal,
    /// Fixed price for a standard weekday.
    pub standard_day_rate: Decimal,
    /// Fixed price for a weekend day.
    pub weekend_day_rate: Decimal,
}

impl RateTable {
    /// Returns the premium hourly rate for a day type.
    ///
    /// Public holidays and weekends carry their own rate; everything else
    /// (including weekday night shifts) uses the site overtime rate.
    pub fn premium_rate(&self, day_type: DayType) -> Decimal {
        match day_type {
            DayType::PublicHoliday => self.public_holiday,
            DayType::Weekend => self.weekend,
            DayType::Weekday => self.site_overtime,
        }
    }

    /// Returns the rate stored under a key, if the key is known.
    pub fn get(&self, key: &str) -> Option<Decimal> {
        let value = match key {
            "site_normal" => self.site_normal,
            "site_overtime" => self.site_overtime,
            "weekend" => self.weekend,
            "public_holiday" => self.public_holiday,
            "travel" => self.travel,
            "travel_overtime" => self.travel_overtime,
            "vehicle" => self.vehicle,
            "per_diem" => self.per_diem,
            "office_reporting" => self.office_reporting,
            "travel_charge" => self.travel_charge,
            "travel_charge_ex_brisbane" => self.travel_charge_ex_brisbane,
            "standard_day_rate" => self.standard_day_rate,
            "weekend_day_rate" => self.weekend_day_rate,
            _ => return None,
        };
        Some(value)
    }

    /// Builds a rate table from a key/value map.
    ///
    /// Fails with [`EngineError::InvalidRateTable`] when a required key is
    /// missing, a key is not recognised, or a rate is negative.
    pub fn from_map(map: &HashMap<String, Decimal>) -> EngineResult<Self> {
        for (key, value) in map {
            if !REQUIRED_RATE_KEYS.contains(&key.as_str())
                && !OPTIONAL_RATE_KEYS.contains(&key.as_str())
            {
                return Err(EngineError::InvalidRateTable {
                    key: key.clone(),
                    message: "unknown rate".to_string(),
                });
            }
            if *value < Decimal::ZERO {
                return Err(EngineError::InvalidRateTable {
                    key: key.clone(),
                    message: format!("rate must not be negative (got {})", value),
                });
            }
        }

        let required = |key: &str| {
            map.get(key)
                .copied()
                .ok_or_else(|| EngineError::InvalidRateTable {
                    key: key.to_string(),
                    message: "missing required rate".to_string(),
                })
        };
        let optional = |key: &str| map.get(key).copied().unwrap_or(Decimal::ZERO);

        Ok(Self {
            site_normal: required("site_normal")?,
            site_overtime: required("site_overtime")?,
            weekend: required("weekend")?,
            public_holiday: required("public_holiday")?,
            travel: required("travel")?,
            travel_overtime: required("travel_overtime")?,
            vehicle: required("vehicle")?,
            per_diem: required("per_diem")?,
            office_reporting: optional("office_reporting"),
            travel_charge: optional("travel_charge"),
            travel_charge_ex_brisbane: optional("travel_charge_ex_brisbane"),
            standard_day_rate: optional("standard_day_rate"),
            weekend_day_rate: optional("weekend_day_rate"),
        })
    }
}

impl TryFrom<HashMap<String, Decimal>> for RateTable {
    type Error = EngineError;

    fn try_from(map: HashMap<String, Decimal>) -> Result<Self, Self::Error> {
        Self::from_map(&map)
    }
}

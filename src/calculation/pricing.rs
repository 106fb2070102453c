//! Pricing of an allocated shift breakdown.
//!
//! Turns the six hour buckets into priced [`ChargeLine`]s and a total cost,
//! then adds the flat per-shift allowances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, ChargeCategory, ChargeLine, RateTable, Shift, ShiftBreakdown};

/// How travel hours are priced on a normal weekday shift.
///
/// Premium shifts (weekend, public holiday, night) ignore the policy: every
/// hour, travel included, is priced at the single premium rate for the day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingPolicy {
    /// Travel is priced like site time: normal hours at `site_normal`,
    /// overtime hours at the day's premium rate.
    #[default]
    Unified,
    /// Travel is priced at `travel` / `travel_overtime`; site hours at
    /// `site_normal` / the day's premium rate.
    SplitTravel,
}

impl std::fmt::Display for PricingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingPolicy::Unified => write!(f, "unified"),
            PricingPolicy::SplitTravel => write!(f, "split_travel"),
        }
    }
}

/// The priced lines and total cost of a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPricing {
    /// Priced lines, hourly lines first, allowances last.
    pub charges: Vec<ChargeLine>,
    /// Sum of the line amounts.
    pub cost: Decimal,
    /// The audit step recording the pricing.
    pub audit_step: AuditStep,
}

fn overflow(shift: &Shift, what: &str) -> EngineError {
    EngineError::InvalidShiftInput {
        shift_id: shift.id.clone(),
        message: format!("{} overflows the supported decimal range", what),
    }
}

fn hourly_line(
    shift: &Shift,
    category: ChargeCategory,
    hours: Decimal,
    rate: Decimal,
) -> EngineResult<Option<ChargeLine>> {
    if hours <= Decimal::ZERO {
        return Ok(None);
    }
    let amount = hours
        .checked_mul(rate)
        .ok_or_else(|| overflow(shift, "charge amount"))?;
    Ok(Some(ChargeLine {
        category,
        units: hours,
        rate,
        amount,
    }))
}

fn flat_line(category: ChargeCategory, rate: Decimal) -> ChargeLine {
    ChargeLine {
        category,
        units: Decimal::ONE,
        rate,
        amount: rate,
    }
}

/// Prices a shift breakdown against a rate table.
///
/// The premium rate is chosen by day type: public holiday, weekend, or
/// site overtime for everything else. Premium shifts price all hours at
/// that one rate. Weekday day shifts price normal and overtime hours
/// according to `policy`. The vehicle and per diem allowances are added as
/// flat lines when the shift carries them.
///
/// # Example
///
/// ```
/// use quote_engine::calculation::{price_breakdown, PricingPolicy};
/// use quote_engine::models::{DayType, RateTable, Shift, ShiftBreakdown};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rates: RateTable = serde_json::from_str(r#"{
///     "site_normal": 100, "site_overtime": 150, "weekend": 200,
///     "public_holiday": 250, "travel": 80, "travel_overtime": 100,
///     "vehicle": 50, "per_diem": 100
/// }"#).unwrap();
/// let shift = Shift {
///     id: "s1".to_string(),
///     date: NaiveDate::from_ymd_opt(2023, 10, 28).unwrap(),
///     day_type: DayType::Weekend,
///     start_time: "08:00".to_string(),
///     finish_time: "16:00".to_string(),
///     travel_in: Decimal::ZERO,
///     travel_out: Decimal::ZERO,
///     is_night_shift: false,
///     vehicle: false,
///     per_diem: false,
///     tech: String::new(),
/// };
/// let breakdown = ShiftBreakdown {
///     site_ot: Decimal::new(8, 0),
///     total_hours: Decimal::new(8, 0),
///     site_hours: Decimal::new(8, 0),
///     elapsed_hours: Decimal::new(8, 0),
///     ..ShiftBreakdown::default()
/// };
///
/// let pricing = price_breakdown(&breakdown, &shift, &rates, PricingPolicy::Unified, 3).unwrap();
/// assert_eq!(pricing.cost, Decimal::new(1600, 0));
/// ```
pub fn price_breakdown(
    breakdown: &ShiftBreakdown,
    shift: &Shift,
    rates: &RateTable,
    policy: PricingPolicy,
    step_number: u32,
) -> EngineResult<ShiftPricing> {
    let premium = rates.premium_rate(shift.day_type);

    let hourly: Vec<EngineResult<Option<ChargeLine>>> = if shift.is_full_overtime() {
        vec![hourly_line(
            shift,
            ChargeCategory::Overtime,
            breakdown.bucket_sum(),
            premium,
        )]
    } else {
        match policy {
            PricingPolicy::Unified => vec![
                hourly_line(
                    shift,
                    ChargeCategory::NormalTime,
                    breakdown.normal_time_hours(),
                    rates.site_normal,
                ),
                hourly_line(
                    shift,
                    ChargeCategory::Overtime,
                    breakdown.overtime_hours(),
                    premium,
                ),
            ],
            PricingPolicy::SplitTravel => vec![
                hourly_line(
                    shift,
                    ChargeCategory::NormalTime,
                    breakdown.site_nt,
                    rates.site_normal,
                ),
                hourly_line(shift, ChargeCategory::Overtime, breakdown.site_ot, premium),
                hourly_line(
                    shift,
                    ChargeCategory::TravelNormalTime,
                    breakdown.travel_nt(),
                    rates.travel,
                ),
                hourly_line(
                    shift,
                    ChargeCategory::TravelOvertime,
                    breakdown.travel_ot(),
                    rates.travel_overtime,
                ),
            ],
        }
    };

    let mut charges: Vec<ChargeLine> = hourly
        .into_iter()
        .collect::<EngineResult<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect();
    if shift.vehicle {
        charges.push(flat_line(ChargeCategory::Vehicle, rates.vehicle));
    }
    if shift.per_diem {
        charges.push(flat_line(ChargeCategory::PerDiem, rates.per_diem));
    }

    let cost = charges
        .iter()
        .try_fold(Decimal::ZERO, |total, c| total.checked_add(c.amount))
        .ok_or_else(|| overflow(shift, "shift cost"))?;

    let reasoning = if shift.is_full_overtime() {
        format!(
            "All {} hours priced at premium rate {}",
            breakdown.bucket_sum().normalize(),
            premium.normalize()
        )
    } else {
        format!(
            "{} normal hours and {} overtime hours priced under {} policy",
            breakdown.normal_time_hours().normalize(),
            breakdown.overtime_hours().normalize(),
            policy
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "shift_pricing".to_string(),
        rule_name: "Shift Pricing".to_string(),
        input: serde_json::json!({
            "day_type": shift.day_type.to_string(),
            "is_night_shift": shift.is_night_shift,
            "policy": policy.to_string(),
            "premium_rate": premium.normalize().to_string(),
            "vehicle": shift.vehicle,
            "per_diem": shift.per_diem
        }),
        output: serde_json::json!({
            "lines": charges.len(),
            "cost": cost.normalize().to_string()
        }),
        reasoning,
    };

    Ok(ShiftPricing {
        charges,
        cost,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayType;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rates() -> RateTable {
        serde_json::from_value(serde_json::json!({
            "site_normal": 100, "site_overtime": 150, "weekend": 200,
            "public_holiday": 250, "travel": 80, "travel_overtime": 100,
            "vehicle": 50, "per_diem": 100
        }))
        .unwrap()
    }

    fn shift(day_type: DayType, night: bool) -> Shift {
        Shift {
            id: "s1".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 10, 27).unwrap(),
            day_type,
            start_time: "08:00".to_string(),
            finish_time: "16:00".to_string(),
            travel_in: dec("0.5"),
            travel_out: dec("0.5"),
            is_night_shift: night,
            vehicle: false,
            per_diem: false,
            tech: String::new(),
        }
    }

    fn weekday_breakdown() -> ShiftBreakdown {
        ShiftBreakdown {
            travel_in_nt: dec("0.5"),
            travel_in_ot: Decimal::ZERO,
            site_nt: dec("7"),
            site_ot: Decimal::ZERO,
            travel_out_nt: Decimal::ZERO,
            travel_out_ot: dec("0.5"),
            total_hours: dec("8"),
            site_hours: dec("7"),
            elapsed_hours: dec("8"),
        }
    }

    fn premium_breakdown() -> ShiftBreakdown {
        ShiftBreakdown {
            travel_in_ot: dec("0.5"),
            site_ot: dec("7"),
            travel_out_ot: dec("0.5"),
            total_hours: dec("8"),
            site_hours: dec("7"),
            elapsed_hours: dec("8"),
            ..ShiftBreakdown::default()
        }
    }

    #[test]
    fn test_unified_weekday_pricing() {
        let pricing = price_breakdown(
            &weekday_breakdown(),
            &shift(DayType::Weekday, false),
            &rates(),
            PricingPolicy::Unified,
            3,
        )
        .unwrap();

        assert_eq!(pricing.cost, dec("825"));
        assert_eq!(pricing.charges.len(), 2);
        assert_eq!(pricing.charges[0].category, ChargeCategory::NormalTime);
        assert_eq!(pricing.charges[0].units, dec("7.5"));
        assert_eq!(pricing.charges[1].category, ChargeCategory::Overtime);
        assert_eq!(pricing.charges[1].amount, dec("75"));
    }

    #[test]
    fn test_split_travel_weekday_pricing() {
        let pricing = price_breakdown(
            &weekday_breakdown(),
            &shift(DayType::Weekday, false),
            &rates(),
            PricingPolicy::SplitTravel,
            3,
        )
        .unwrap();

        // 7 * 100 site + 0.5 * 80 travel NT + 0.5 * 100 travel OT
        assert_eq!(pricing.cost, dec("790"));
        let categories: Vec<ChargeCategory> = pricing.charges.iter().map(|c| c.category).collect();
        assert_eq!(
            categories,
            vec![
                ChargeCategory::NormalTime,
                ChargeCategory::TravelNormalTime,
                ChargeCategory::TravelOvertime,
            ]
        );
    }

    #[test]
    fn test_weekend_prices_everything_at_weekend_rate() {
        for policy in [PricingPolicy::Unified, PricingPolicy::SplitTravel] {
            let pricing = price_breakdown(
                &premium_breakdown(),
                &shift(DayType::Weekend, false),
                &rates(),
                policy,
                3,
            )
            .unwrap();
            assert_eq!(pricing.cost, dec("1600"));
            assert_eq!(pricing.charges.len(), 1);
            assert_eq!(pricing.charges[0].rate, dec("200"));
        }
    }

    #[test]
    fn test_public_holiday_rate() {
        let pricing = price_breakdown(
            &premium_breakdown(),
            &shift(DayType::PublicHoliday, false),
            &rates(),
            PricingPolicy::Unified,
            3,
        )
        .unwrap();
        assert_eq!(pricing.cost, dec("2000"));
    }

    #[test]
    fn test_weekday_night_shift_uses_site_overtime_rate() {
        let pricing = price_breakdown(
            &premium_breakdown(),
            &shift(DayType::Weekday, true),
            &rates(),
            PricingPolicy::SplitTravel,
            3,
        )
        .unwrap();
        assert_eq!(pricing.cost, dec("1200"));
        assert_eq!(pricing.charges[0].rate, dec("150"));
    }

    #[test]
    fn test_allowances_added_as_flat_lines() {
        let mut s = shift(DayType::Weekday, false);
        s.vehicle = true;
        s.per_diem = true;

        let pricing =
            price_breakdown(&weekday_breakdown(), &s, &rates(), PricingPolicy::Unified, 3).unwrap();

        assert_eq!(pricing.cost, dec("975"));
        let last_two: Vec<ChargeCategory> =
            pricing.charges.iter().rev().take(2).map(|c| c.category).collect();
        assert_eq!(last_two, vec![ChargeCategory::PerDiem, ChargeCategory::Vehicle]);
    }

    #[test]
    fn test_zero_hour_shift_has_no_hourly_lines() {
        let pricing = price_breakdown(
            &ShiftBreakdown::default(),
            &shift(DayType::Weekday, false),
            &rates(),
            PricingPolicy::Unified,
            3,
        )
        .unwrap();
        assert!(pricing.charges.is_empty());
        assert_eq!(pricing.cost, Decimal::ZERO);
    }

    #[test]
    fn test_pricing_audit_step() {
        let pricing = price_breakdown(
            &premium_breakdown(),
            &shift(DayType::Weekend, false),
            &rates(),
            PricingPolicy::Unified,
            3,
        )
        .unwrap();
        assert_eq!(pricing.audit_step.step_number, 3);
        assert_eq!(pricing.audit_step.rule_id, "shift_pricing");
        assert_eq!(pricing.audit_step.input["premium_rate"].as_str().unwrap(), "200");
        assert_eq!(pricing.audit_step.output["cost"].as_str().unwrap(), "1600");
        assert!(pricing.audit_step.reasoning.contains("premium rate"));
    }

    #[test]
    fn test_amount_overflow_is_an_error() {
        let mut huge = rates();
        huge.site_normal = dec("50000000000000000000000000000");

        let err = price_breakdown(
            &weekday_breakdown(),
            &shift(DayType::Weekday, false),
            &huge,
            PricingPolicy::Unified,
            3,
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::InvalidShiftInput { ref shift_id, .. } if shift_id == "s1"));
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_policy_serialization() {
        let policy: PricingPolicy = serde_json::from_str("\"split_travel\"").unwrap();
        assert_eq!(policy, PricingPolicy::SplitTravel);
        assert_eq!(PricingPolicy::default(), PricingPolicy::Unified);
    }
}

//! Shift cost allocation.
//!
//! The entry point of the engine: derives a shift's durations, splits them
//! into normal-time and overtime buckets, and prices the result. Every call
//! is independent and side-effect free; the same shift and rates always give
//! the same [`AllocationResult`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AllocationResult, AuditStep, RateTable, Shift, ShiftBreakdown};

use super::elapsed_time::elapsed_hours;
use super::phase_allocation::{
    NORMAL_TIME_CEILING, allocate_full_overtime, allocate_normal_time,
};
use super::pricing::{PricingPolicy, price_breakdown};

/// Allocates and prices a shift with the default [`PricingPolicy`].
///
/// # Errors
///
/// - [`InvalidTimeFormat`](crate::error::EngineError::InvalidTimeFormat) if
///   either clock time is not `HH:MM`.
/// - [`InvalidShiftInput`](crate::error::EngineError::InvalidShiftInput) if
///   a travel duration is negative or longer than a day, or a charge
///   overflows the decimal range.
///
/// # Example
///
/// ```
/// use quote_engine::calculation::allocate;
/// use quote_engine::models::{DayType, RateTable, Shift};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates: RateTable = serde_json::from_str(r#"{
///     "site_normal": 100, "site_overtime": 150, "weekend": 200,
///     "public_holiday": 250, "travel": 80, "travel_overtime": 100,
///     "vehicle": 50, "per_diem": 100
/// }"#).unwrap();
/// let shift = Shift {
///     id: "s1".to_string(),
///     date: NaiveDate::from_ymd_opt(2023, 10, 27).unwrap(),
///     day_type: DayType::Weekday,
///     start_time: "08:00".to_string(),
///     finish_time: "16:00".to_string(),
///     travel_in: Decimal::from_str("0.5").unwrap(),
///     travel_out: Decimal::from_str("0.5").unwrap(),
///     is_night_shift: false,
///     vehicle: false,
///     per_diem: false,
///     tech: "Test Tech".to_string(),
/// };
///
/// let result = allocate(&shift, &rates).unwrap();
/// assert_eq!(result.breakdown.site_hours, Decimal::new(7, 0));
/// assert_eq!(result.cost, Decimal::new(825, 0));
/// ```
pub fn allocate(shift: &Shift, rates: &RateTable) -> EngineResult<AllocationResult> {
    allocate_with_policy(shift, rates, PricingPolicy::default())
}

/// Allocates and prices a shift under an explicit [`PricingPolicy`].
///
/// Steps, each recorded in the audit trail:
/// 1. Clock duration from start/finish (wrapping past midnight); site hours
///    are the duration less travel, clamped at zero.
/// 2. Normal-time allocation against the 7.5 hour ceiling in the order
///    travel-in, site, travel-out; or, for weekend, public holiday and night
///    shifts, every hour to overtime.
/// 3. Pricing of the buckets plus flat allowances.
pub fn allocate_with_policy(
    shift: &Shift,
    rates: &RateTable,
    policy: PricingPolicy,
) -> EngineResult<AllocationResult> {
    shift.validate()?;

    let elapsed = elapsed_hours(&shift.start_time, &shift.finish_time)?;
    let site_hours = (elapsed - shift.travel_in - shift.travel_out).max(Decimal::ZERO);
    let total_hours = shift.travel_in + site_hours + shift.travel_out;

    let mut audit_steps = vec![duration_audit_step(shift, elapsed, site_hours, 1)];

    let allocation = if shift.is_full_overtime() {
        let trigger = if shift.is_night_shift {
            "night".to_string()
        } else {
            shift.day_type.to_string()
        };
        allocate_full_overtime(shift.travel_in, site_hours, shift.travel_out, &trigger, 2)
    } else {
        allocate_normal_time(
            shift.travel_in,
            site_hours,
            shift.travel_out,
            NORMAL_TIME_CEILING,
            2,
        )
    };
    audit_steps.push(allocation.audit_step);

    let breakdown = ShiftBreakdown {
        travel_in_nt: allocation.travel_in.normal,
        travel_in_ot: allocation.travel_in.overtime,
        site_nt: allocation.site.normal,
        site_ot: allocation.site.overtime,
        travel_out_nt: allocation.travel_out.normal,
        travel_out_ot: allocation.travel_out.overtime,
        total_hours,
        site_hours,
        elapsed_hours: elapsed,
    };

    let pricing = price_breakdown(&breakdown, shift, rates, policy, 3)?;
    audit_steps.push(pricing.audit_step);

    debug!(
        shift_id = %shift.id,
        day_type = %shift.day_type,
        night = shift.is_night_shift,
        total_hours = %breakdown.total_hours,
        cost = %pricing.cost,
        "Shift allocated"
    );

    Ok(AllocationResult {
        shift_id: shift.id.clone(),
        breakdown,
        charges: pricing.charges,
        cost: pricing.cost,
        audit_steps,
    })
}

fn duration_audit_step(
    shift: &Shift,
    elapsed: Decimal,
    site_hours: Decimal,
    step_number: u32,
) -> AuditStep {
    let travel = shift.travel_in + shift.travel_out;
    let reasoning = if travel > elapsed {
        format!(
            "{} travel hours exceed {} elapsed hours; site hours clamped to 0",
            travel.normalize(),
            elapsed.normalize()
        )
    } else {
        format!(
            "{} to {} is {} hours, {} on site after {} travel",
            shift.start_time,
            shift.finish_time,
            elapsed.normalize(),
            site_hours.normalize(),
            travel.normalize()
        )
    };

    AuditStep {
        step_number,
        rule_id: "elapsed_time".to_string(),
        rule_name: "Elapsed Time".to_string(),
        input: serde_json::json!({
            "start_time": shift.start_time,
            "finish_time": shift.finish_time,
            "travel_in": shift.travel_in.normalize().to_string(),
            "travel_out": shift.travel_out.normalize().to_string()
        }),
        output: serde_json::json!({
            "elapsed_hours": elapsed.normalize().to_string(),
            "site_hours": site_hours.normalize().to_string()
        }),
        reasoning,
    }
}

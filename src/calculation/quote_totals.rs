//! Quote-level totals.
//!
//! Folds the allocation of every shift on a quote together with the
//! quote-level flat charges: office reporting time, the travel charge and
//! extras.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AllocationResult, ChargeCategory, JobDetails, Quote, RateTable};

use super::pricing::PricingPolicy;
use super::shift_allocator::allocate_with_policy;

/// Differences between invoiced and quoted amounts up to this size are not
/// reported as a variance.
pub const VARIANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Aggregated totals for a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    /// Normal-time labour across all shifts.
    pub labour_normal: Decimal,
    /// Overtime and premium labour across all shifts.
    pub labour_overtime: Decimal,
    /// Vehicle allowances across all shifts.
    pub vehicle_total: Decimal,
    /// Per diems across all shifts.
    pub per_diem_total: Decimal,
    /// Sum of every shift's cost.
    pub shifts_total: Decimal,
    /// Office reporting time charge.
    pub reporting: Decimal,
    /// Per-kilometre travel charge plus any out-of-area surcharge.
    pub travel_charge: Decimal,
    /// Sum of the extras.
    pub extras_total: Decimal,
    /// Everything above: shifts, reporting, travel charge and extras.
    pub grand_total: Decimal,
    /// `grand_total - quoted_amount`, when a quoted amount is set and the
    /// difference is more than one cent.
    pub variance: Option<Decimal>,
}

/// A quote's totals together with the per-shift allocations they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSummary {
    /// One allocation per shift, in shift order.
    pub allocations: Vec<AllocationResult>,
    /// Aggregated totals.
    pub totals: QuoteTotals,
}

fn overflow(field: &str) -> EngineError {
    EngineError::InvalidQuote {
        field: field.to_string(),
        message: "overflows the supported decimal range".to_string(),
    }
}

fn checked_total<I>(values: I, field: &str) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(value))
        .ok_or_else(|| overflow(field))
}

/// Returns the office reporting charge for a job.
pub fn reporting_cost(job: &JobDetails, rates: &RateTable) -> EngineResult<Decimal> {
    job.reporting_time
        .checked_mul(rates.office_reporting)
        .ok_or_else(|| overflow("reporting_time"))
}

/// Returns the travel charge for a job, or zero when it is not billed.
///
/// The charge is the billed distance at the per-kilometre rate plus the
/// flat out-of-area surcharge.
pub fn travel_charge_cost(job: &JobDetails, rates: &RateTable) -> EngineResult<Decimal> {
    if !job.include_travel_charge {
        return Ok(Decimal::ZERO);
    }
    job.travel_distance_km
        .checked_mul(rates.travel_charge)
        .and_then(|distance| distance.checked_add(rates.travel_charge_ex_brisbane))
        .ok_or_else(|| overflow("travel_distance_km"))
}

/// Allocates every shift on a quote and totals the result.
///
/// The first shift that fails to allocate aborts the whole summary.
///
/// # Errors
///
/// Propagates allocator errors, and returns
/// [`EngineError::InvalidQuote`] for a negative reporting time, travel
/// distance or extra cost, or when a total overflows the decimal range.
pub fn summarize_quote(
    quote: &Quote,
    rates: &RateTable,
    policy: PricingPolicy,
) -> EngineResult<QuoteSummary> {
    validate_job_quantities(quote)?;

    let allocations = quote
        .shifts
        .iter()
        .map(|shift| allocate_with_policy(shift, rates, policy))
        .collect::<EngineResult<Vec<_>>>()?;

    let sum_by = |f: fn(&AllocationResult) -> Decimal, field: &str| -> EngineResult<Decimal> {
        checked_total(allocations.iter().map(f), field)
    };

    let labour_normal = sum_by(AllocationResult::normal_time_cost, "shifts")?;
    let labour_overtime = sum_by(AllocationResult::overtime_cost, "shifts")?;
    let vehicle_total = sum_by(|a| a.amount_for(ChargeCategory::Vehicle), "shifts")?;
    let per_diem_total = sum_by(|a| a.amount_for(ChargeCategory::PerDiem), "shifts")?;
    let shifts_total = sum_by(|a| a.cost, "shifts")?;

    let reporting = reporting_cost(&quote.job_details, rates)?;
    let travel_charge = travel_charge_cost(&quote.job_details, rates)?;
    let extras_total = checked_total(quote.extras.iter().map(|e| e.cost), "extras")?;

    let grand_total = checked_total(
        [shifts_total, reporting, travel_charge, extras_total],
        "grand_total",
    )?;

    let variance = quote
        .job_details
        .quoted_amount
        .filter(|quoted| *quoted > Decimal::ZERO)
        .map(|quoted| grand_total - quoted)
        .filter(|diff| diff.abs() > VARIANCE_TOLERANCE);

    debug!(
        quote_id = %quote.id,
        shifts = allocations.len(),
        grand_total = %grand_total,
        "Quote summarised"
    );

    Ok(QuoteSummary {
        allocations,
        totals: QuoteTotals {
            labour_normal,
            labour_overtime,
            vehicle_total,
            per_diem_total,
            shifts_total,
            reporting,
            travel_charge,
            extras_total,
            grand_total,
            variance,
        },
    })
}

fn validate_job_quantities(quote: &Quote) -> EngineResult<()> {
    let job = &quote.job_details;
    let negative = |field: &str, value: Decimal| EngineError::InvalidQuote {
        field: field.to_string(),
        message: format!("must not be negative (got {})", value),
    };

    if job.reporting_time < Decimal::ZERO {
        return Err(negative("reporting_time", job.reporting_time));
    }
    if job.travel_distance_km < Decimal::ZERO {
        return Err(negative("travel_distance_km", job.travel_distance_km));
    }
    if let Some(extra) = quote.extras.iter().find(|e| e.cost < Decimal::ZERO) {
        return Err(negative(&format!("extras.{}", extra.id), extra.cost));
    }
    Ok(())
}

//! Calculation logic for the quote engine.
//!
//! This module contains the shift cost-allocation engine (clock-time
//! parsing, normal-time/overtime allocation across the travel-in, site and
//! travel-out phases, and pricing), plus the reductions built on it: quote
//! totals and the plain-text breakdown report.

mod breakdown_report;
mod elapsed_time;
mod phase_allocation;
mod pricing;
mod quote_totals;
mod shift_allocator;

pub use breakdown_report::shift_breakdown_report;
pub use elapsed_time::{DURATION_DECIMAL_PLACES, elapsed_hours, parse_clock_minutes};
pub use phase_allocation::{
    NORMAL_TIME_CEILING, Phase, PhaseAllocation, PhaseSplit, allocate_full_overtime,
    allocate_normal_time,
};
pub use pricing::{PricingPolicy, ShiftPricing, price_breakdown};
pub use quote_totals::{
    QuoteSummary, QuoteTotals, VARIANCE_TOLERANCE, reporting_cost, summarize_quote,
    travel_charge_cost,
};
pub use shift_allocator::{allocate, allocate_with_policy};

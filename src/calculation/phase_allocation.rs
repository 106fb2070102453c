//! Normal-time / overtime allocation across the phases of a shift.
//!
//! A shift is worked in three fixed phases: travel to site, time on site,
//! and travel home. Normal time is capped at a daily ceiling which is
//! consumed by the phases in that order, so travel-in is always the first
//! to claim normal time and travel-out the last.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

/// Normal-time hours available per day before overtime applies.
pub const NORMAL_TIME_CEILING: Decimal = Decimal::from_parts(75, 0, 0, false, 1);

/// One of the three ordered phases of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Travel to site.
    TravelIn,
    /// Work on site.
    Site,
    /// Travel home.
    TravelOut,
}

/// The hours of one phase split into normal time and overtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSplit {
    /// The phase these hours belong to.
    pub phase: Phase,
    /// Hours billed at normal time.
    pub normal: Decimal,
    /// Hours billed as overtime.
    pub overtime: Decimal,
}

/// The three phase splits of a shift, plus the audit step recording them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseAllocation {
    /// Travel-in split.
    pub travel_in: PhaseSplit,
    /// On-site split.
    pub site: PhaseSplit,
    /// Travel-out split.
    pub travel_out: PhaseSplit,
    /// The audit step recording this allocation.
    pub audit_step: AuditStep,
}

/// Splits one phase against the remaining normal time.
///
/// `consumed` is the number of hours already worked today by earlier phases.
fn split_phase(phase: Phase, hours: Decimal, consumed: Decimal, ceiling: Decimal) -> PhaseSplit {
    let remaining = (ceiling - consumed).max(Decimal::ZERO);
    let normal = hours.min(remaining).max(Decimal::ZERO);
    PhaseSplit {
        phase,
        normal,
        overtime: hours - normal,
    }
}

/// Allocates normal time across the phases of a weekday day shift.
///
/// A rolling count of hours consumed starts at zero and is carried through
/// travel-in, site and travel-out in that order. Each phase takes normal
/// time up to whatever is left under `ceiling`; the rest of the phase is
/// overtime. Once the ceiling is reached every later hour is overtime.
///
/// # Example
///
/// ```
/// use quote_engine::calculation::{allocate_normal_time, NORMAL_TIME_CEILING};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let d = |s: &str| Decimal::from_str(s).unwrap();
/// let result = allocate_normal_time(d("1"), d("10"), d("1"), NORMAL_TIME_CEILING, 2);
///
/// assert_eq!(result.travel_in.normal, d("1"));
/// assert_eq!(result.site.normal, d("6.5"));
/// assert_eq!(result.site.overtime, d("3.5"));
/// assert_eq!(result.travel_out.overtime, d("1"));
/// ```
pub fn allocate_normal_time(
    travel_in: Decimal,
    site: Decimal,
    travel_out: Decimal,
    ceiling: Decimal,
    step_number: u32,
) -> PhaseAllocation {
    let phases = [
        (Phase::TravelIn, travel_in),
        (Phase::Site, site),
        (Phase::TravelOut, travel_out),
    ];

    let (splits, consumed) = phases.iter().fold(
        (Vec::with_capacity(phases.len()), Decimal::ZERO),
        |(mut splits, consumed), &(phase, hours)| {
            splits.push(split_phase(phase, hours, consumed, ceiling));
            (splits, consumed + hours)
        },
    );
    let [travel_in_split, site_split, travel_out_split] = [splits[0], splits[1], splits[2]];

    let normal_total = travel_in_split.normal + site_split.normal + travel_out_split.normal;
    let reasoning = if consumed > ceiling {
        format!(
            "{} hours worked exceeds {} hour normal-time ceiling; {} hours allocated as overtime",
            consumed.normalize(),
            ceiling.normalize(),
            (consumed - normal_total).normalize()
        )
    } else {
        format!(
            "{} hours worked is within {} hour normal-time ceiling, no overtime",
            consumed.normalize(),
            ceiling.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "normal_time_allocation".to_string(),
        rule_name: "Normal Time Allocation".to_string(),
        input: serde_json::json!({
            "travel_in": travel_in.normalize().to_string(),
            "site": site.normalize().to_string(),
            "travel_out": travel_out.normalize().to_string(),
            "ceiling": ceiling.normalize().to_string()
        }),
        output: serde_json::json!({
            "travel_in_nt": travel_in_split.normal.normalize().to_string(),
            "travel_in_ot": travel_in_split.overtime.normalize().to_string(),
            "site_nt": site_split.normal.normalize().to_string(),
            "site_ot": site_split.overtime.normalize().to_string(),
            "travel_out_nt": travel_out_split.normal.normalize().to_string(),
            "travel_out_ot": travel_out_split.overtime.normalize().to_string()
        }),
        reasoning,
    };

    PhaseAllocation {
        travel_in: travel_in_split,
        site: site_split,
        travel_out: travel_out_split,
        audit_step,
    }
}

/// Allocates every hour of every phase to overtime.
///
/// Used for weekend, public holiday and night shifts, which skip the
/// normal-time ceiling altogether. `reason` names the trigger for the audit
/// trail.
pub fn allocate_full_overtime(
    travel_in: Decimal,
    site: Decimal,
    travel_out: Decimal,
    reason: &str,
    step_number: u32,
) -> PhaseAllocation {
    let all_overtime = |phase, hours| PhaseSplit {
        phase,
        normal: Decimal::ZERO,
        overtime: hours,
    };

    let total = travel_in + site + travel_out;
    let audit_step = AuditStep {
        step_number,
        rule_id: "premium_override".to_string(),
        rule_name: "Premium Day Override".to_string(),
        input: serde_json::json!({
            "travel_in": travel_in.normalize().to_string(),
            "site": site.normalize().to_string(),
            "travel_out": travel_out.normalize().to_string(),
            "trigger": reason
        }),
        output: serde_json::json!({
            "normal_hours": "0",
            "overtime_hours": total.normalize().to_string()
        }),
        reasoning: format!(
            "{} shift: all {} hours allocated as overtime",
            reason,
            total.normalize()
        ),
    };

    PhaseAllocation {
        travel_in: all_overtime(Phase::TravelIn, travel_in),
        site: all_overtime(Phase::Site, site),
        travel_out: all_overtime(Phase::TravelOut, travel_out),
        audit_step,
    }
}

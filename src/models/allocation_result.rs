//! Allocation result models.
//!
//! This module contains the [`AllocationResult`] type and the structures it
//! carries: the six-bucket [`ShiftBreakdown`], the priced [`ChargeLine`]s
//! and the [`AuditStep`]s recording each allocation decision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hours of a shift split into normal time and overtime per phase.
///
/// The six buckets always sum to `total_hours`, and every bucket is
/// non-negative.
///
/// # Example
///
/// ```
/// use quote_engine::models::ShiftBreakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let breakdown = ShiftBreakdown {
///     travel_in_nt: Decimal::from_str("0.5").unwrap(),
///     travel_in_ot: Decimal::ZERO,
///     site_nt: Decimal::from_str("7").unwrap(),
///     site_ot: Decimal::ZERO,
///     travel_out_nt: Decimal::ZERO,
///     travel_out_ot: Decimal::from_str("0.5").unwrap(),
///     total_hours: Decimal::from_str("8").unwrap(),
///     site_hours: Decimal::from_str("7").unwrap(),
///     elapsed_hours: Decimal::from_str("8").unwrap(),
/// };
/// assert_eq!(breakdown.bucket_sum(), breakdown.total_hours);
/// assert_eq!(breakdown.normal_time_hours(), Decimal::from_str("7.5").unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftBreakdown {
    /// Travel-in hours billed at normal time.
    pub travel_in_nt: Decimal,
    /// Travel-in hours billed as overtime.
    pub travel_in_ot: Decimal,
    /// On-site hours billed at normal time.
    pub site_nt: Decimal,
    /// On-site hours billed as overtime.
    pub site_ot: Decimal,
    /// Travel-out hours billed at normal time.
    pub travel_out_nt: Decimal,
    /// Travel-out hours billed as overtime.
    pub travel_out_ot: Decimal,
    /// Travel-in plus site plus travel-out hours.
    pub total_hours: Decimal,
    /// Clock duration less travel, never negative.
    pub site_hours: Decimal,
    /// Clock duration between start and finish, wrapped past midnight.
    pub elapsed_hours: Decimal,
}

impl ShiftBreakdown {
    /// Returns the sum of the six hour buckets.
    pub fn bucket_sum(&self) -> Decimal {
        self.normal_time_hours() + self.overtime_hours()
    }

    /// Returns the normal-time hours across all three phases.
    pub fn normal_time_hours(&self) -> Decimal {
        self.travel_in_nt + self.site_nt + self.travel_out_nt
    }

    /// Returns the overtime hours across all three phases.
    pub fn overtime_hours(&self) -> Decimal {
        self.travel_in_ot + self.site_ot + self.travel_out_ot
    }

    /// Returns the travel hours (both directions) billed at normal time.
    pub fn travel_nt(&self) -> Decimal {
        self.travel_in_nt + self.travel_out_nt
    }

    /// Returns the travel hours (both directions) billed as overtime.
    pub fn travel_ot(&self) -> Decimal {
        self.travel_in_ot + self.travel_out_ot
    }
}

/// What a charge line is billing for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeCategory {
    /// Normal-time hours (site, and travel under unified pricing).
    NormalTime,
    /// Overtime or premium hours (site, and travel under unified pricing).
    Overtime,
    /// Normal-time travel hours under split travel pricing.
    TravelNormalTime,
    /// Overtime travel hours under split travel pricing.
    TravelOvertime,
    /// Flat vehicle allowance.
    Vehicle,
    /// Flat per diem.
    PerDiem,
}

impl ChargeCategory {
    /// Returns true for categories billed at normal-time rates.
    pub fn is_normal_time(&self) -> bool {
        matches!(self, ChargeCategory::NormalTime | ChargeCategory::TravelNormalTime)
    }

    /// Returns true for categories billed at overtime or premium rates.
    pub fn is_overtime(&self) -> bool {
        matches!(self, ChargeCategory::Overtime | ChargeCategory::TravelOvertime)
    }
}

/// A single priced line of a shift's cost.
///
/// # Example
///
/// ```
/// use quote_engine::models::{ChargeCategory, ChargeLine};
/// use rust_decimal::Decimal;
///
/// let line = ChargeLine {
///     category: ChargeCategory::Vehicle,
///     units: Decimal::ONE,
///     rate: Decimal::new(50, 0),
///     amount: Decimal::new(50, 0),
/// };
/// assert!(!line.category.is_overtime());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeLine {
    /// What the line bills for.
    pub category: ChargeCategory,
    /// Hours for hourly lines, 1 for flat allowances.
    pub units: Decimal,
    /// Rate applied per unit.
    pub rate: Decimal,
    /// `units * rate`.
    pub amount: Decimal,
}

/// A single step in the audit trace recording an allocation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The result of allocating and pricing one shift.
///
/// `cost` is the sum of the `charges` amounts and carries no state of its
/// own; the whole value is recomputed whenever the shift or rates change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// The ID of the shift this result was computed from.
    pub shift_id: String,
    /// The six-bucket hour breakdown.
    pub breakdown: ShiftBreakdown,
    /// The priced lines making up `cost`.
    pub charges: Vec<ChargeLine>,
    /// The total dollar cost of the shift.
    pub cost: Decimal,
    /// The allocation decisions, in order.
    pub audit_steps: Vec<AuditStep>,
}

impl AllocationResult {
    /// Returns the summed amount of the normal-time charge lines.
    pub fn normal_time_cost(&self) -> Decimal {
        self.charges
            .iter()
            .filter(|c| c.category.is_normal_time())
            .map(|c| c.amount)
            .sum()
    }

    /// Returns the summed amount of the overtime charge lines.
    pub fn overtime_cost(&self) -> Decimal {
        self.charges
            .iter()
            .filter(|c| c.category.is_overtime())
            .map(|c| c.amount)
            .sum()
    }

    /// Returns the amount charged for a category, or zero.
    pub fn amount_for(&self, category: ChargeCategory) -> Decimal {
        self.charges
            .iter()
            .filter(|c| c.category == category)
            .map(|c| c.amount)
            .sum()
    }
}

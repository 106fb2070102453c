//! Plain-text shift breakdown report.

use crate::error::EngineResult;
use crate::models::{RateTable, Shift};

use super::pricing::PricingPolicy;
use super::shift_allocator::allocate_with_policy;

/// Renders the hour breakdown of every shift as plain text.
///
/// Each shift lists its date, technician, clock times and day type, then
/// the normal/overtime split of each phase and the total and site hours,
/// all to two decimal places.
///
/// # Example
///
/// ```
/// use quote_engine::calculation::{shift_breakdown_report, PricingPolicy};
/// use quote_engine::models::RateTable;
///
/// let rates: RateTable = serde_json::from_str(r#"{
///     "site_normal": 100, "site_overtime": 150, "weekend": 200,
///     "public_holiday": 250, "travel": 80, "travel_overtime": 100,
///     "vehicle": 50, "per_diem": 100
/// }"#).unwrap();
///
/// let report = shift_breakdown_report(&[], &rates, PricingPolicy::Unified).unwrap();
/// assert_eq!(report, "SHIFT BREAKDOWN\n\n");
/// ```
pub fn shift_breakdown_report(
    shifts: &[Shift],
    rates: &RateTable,
    policy: PricingPolicy,
) -> EngineResult<String> {
    let mut report = String::from("SHIFT BREAKDOWN\n\n");

    for (index, shift) in shifts.iter().enumerate() {
        let b = allocate_with_policy(shift, rates, policy)?.breakdown;
        let night = if shift.is_night_shift { " (Night Shift)" } else { "" };

        report.push_str(&format!(
            "Shift {}:\n\
             Date: {} | Tech: {}\n\
             Time: {} - {}\n\
             Day Type: {}{}\n\
             \n\
             Hours Breakdown:\n",
            index + 1,
            shift.date,
            shift.tech,
            shift.start_time,
            shift.finish_time,
            shift.day_type,
            night
        ));
        report.push_str(&format!(
            "  Travel In NT: {:.2}h | OT: {:.2}h\n",
            b.travel_in_nt, b.travel_in_ot
        ));
        report.push_str(&format!("  Site NT: {:.2}h | OT: {:.2}h\n", b.site_nt, b.site_ot));
        report.push_str(&format!(
            "  Travel Out NT: {:.2}h | OT: {:.2}h\n",
            b.travel_out_nt, b.travel_out_ot
        ));
        report.push_str(&format!(
            "  Total Hours: {:.2}h (Site: {:.2}h)\n\n",
            b.total_hours, b.site_hours
        ));
    }

    Ok(report)
}

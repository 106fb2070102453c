//! Core data models for the quote engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allocation_result;
mod quote;
mod rates;
mod shift;

pub use allocation_result::{
    AllocationResult, AuditStep, ChargeCategory, ChargeLine, ShiftBreakdown,
};
pub use quote::{Extra, JobDetails, Quote, QuoteStatus};
pub use rates::{OPTIONAL_RATE_KEYS, REQUIRED_RATE_KEYS, RateTable};
pub use shift::{DayType, MAX_TRAVEL_HOURS, Shift};

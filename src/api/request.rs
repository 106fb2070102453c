//! Request types for the quote engine API.
//!
//! This module defines the JSON request structures for the `/allocate` and
//! `/quote/summary` endpoints.

use serde::{Deserialize, Serialize};

use crate::models::{Extra, JobDetails, Quote, RateTable, Shift};

/// Request body for the `/allocate` endpoint.
///
/// Carries a single shift. Rates come from `rates` when given, otherwise
/// from the named customer, otherwise from the default table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocateRequest {
    /// The shift to allocate and price.
    pub shift: Shift,
    /// Customer whose configured rate table should be used.
    #[serde(default)]
    pub customer: Option<String>,
    /// An explicit rate table that overrides any configured one.
    #[serde(default)]
    pub rates: Option<RateTable>,
}

/// Request body for the `/quote/summary` endpoint.
///
/// Rates come from `rates`, then the `customer` field, then
/// `job_details.customer` when it names a configured customer, then the
/// default table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSummaryRequest {
    /// Identifier echoed back in the response; generated when absent.
    #[serde(default)]
    pub quote_id: Option<String>,
    /// Job header details.
    #[serde(default)]
    pub job_details: JobDetails,
    /// The shifts on the quote.
    #[serde(default)]
    pub shifts: Vec<Shift>,
    /// Ad-hoc line items.
    #[serde(default)]
    pub extras: Vec<Extra>,
    /// Customer whose configured rate table should be used.
    #[serde(default)]
    pub customer: Option<String>,
    /// An explicit rate table that overrides any configured one.
    #[serde(default)]
    pub rates: Option<RateTable>,
}

impl QuoteSummaryRequest {
    /// Builds a draft quote from the request, using `fallback_id` when the
    /// request carries no quote ID.
    pub fn to_quote(&self, fallback_id: impl Into<String>) -> Quote {
        let mut quote = Quote::new(
            self.quote_id
                .clone()
                .unwrap_or_else(|| fallback_id.into()),
        );
        quote.job_details = self.job_details.clone();
        quote.shifts = self.shifts.clone();
        quote.extras = self.extras.clone();
        quote
    }
}

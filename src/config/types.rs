//! Configuration types for rate tables.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML rate configuration file.

use serde::{Deserialize, Serialize};

use crate::calculation::PricingPolicy;
use crate::models::RateTable;

/// A customer with its own negotiated rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// The customer name as it appears on a quote.
    pub name: String,
    /// The rates billed to this customer.
    pub rates: RateTable,
}

/// The complete rate configuration loaded from YAML.
///
/// ```yaml
/// pricing_policy: unified
/// default_rates:
///   site_normal: 160
///   site_overtime: 190
///   # ...
/// customers:
///   - name: Acme Mining
///     rates:
///       site_normal: 150
///       # ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfig {
    /// How travel hours are priced on weekday day shifts.
    #[serde(default)]
    pub pricing_policy: PricingPolicy,
    /// Rates used when a quote has no customer-specific table.
    pub default_rates: RateTable,
    /// Customer-specific rate tables.
    #[serde(default)]
    pub customers: Vec<Customer>,
}

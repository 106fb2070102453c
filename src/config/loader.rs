//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the rate
//! configuration from a YAML file.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculation::PricingPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::RateTable;

use super::types::RateConfig;

/// Loads and provides access to the rate configuration.
///
/// The configuration is a single YAML file holding the pricing policy, the
/// default rate table and any customer-specific rate tables.
///
/// # Example
///
/// ```no_run
/// use quote_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/rates.yaml").unwrap();
/// let rates = loader.resolve_rates(Some("Acme Mining")).unwrap();
/// println!("Site normal rate: ${}", rates.site_normal);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RateConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML or an invalid rate table
    /// - Two customers share a name
    ///
    /// # Example
    ///
    /// ```no_run
    /// use quote_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/rates.yaml")?;
    /// # Ok::<(), quote_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML text. `source` names the origin in
    /// error messages.
    pub fn from_yaml_str(content: &str, source: &str) -> EngineResult<Self> {
        let config: RateConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        let mut seen = HashSet::new();
        for customer in &config.customers {
            if !seen.insert(customer.name.as_str()) {
                return Err(EngineError::ConfigParseError {
                    path: source.to_string(),
                    message: format!("duplicate customer '{}'", customer.name),
                });
            }
        }

        debug!(
            source,
            customers = config.customers.len(),
            policy = %config.pricing_policy,
            "Rate configuration loaded"
        );

        Ok(Self { config })
    }

    /// Returns the underlying rate configuration.
    pub fn config(&self) -> &RateConfig {
        &self.config
    }

    /// Returns the configured pricing policy.
    pub fn pricing_policy(&self) -> PricingPolicy {
        self.config.pricing_policy
    }

    /// Returns the default rate table.
    pub fn default_rates(&self) -> &RateTable {
        &self.config.default_rates
    }

    /// Returns the names of all configured customers.
    pub fn customer_names(&self) -> impl Iterator<Item = &str> {
        self.config.customers.iter().map(|c| c.name.as_str())
    }

    /// Gets a customer's rate table by exact name.
    ///
    /// # Returns
    ///
    /// Returns the customer's rates if found, or `CustomerNotFound`.
    pub fn customer_rates(&self, name: &str) -> EngineResult<&RateTable> {
        self.config
            .customers
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.rates)
            .ok_or_else(|| EngineError::CustomerNotFound {
                name: name.to_string(),
            })
    }

    /// Returns the customer's rate table, or the default table when the
    /// name is not configured.
    pub fn customer_rates_or_default(&self, name: &str) -> &RateTable {
        self.customer_rates(name.trim())
            .unwrap_or_else(|_| self.default_rates())
    }

    /// Picks the rates for a quote: the named customer's table, or the
    /// default table when no customer is given.
    pub fn resolve_rates(&self, customer: Option<&str>) -> EngineResult<&RateTable> {
        match customer.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => self.customer_rates(name),
            None => Ok(self.default_rates()),
        }
    }
}

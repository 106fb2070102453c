//! Rate configuration loading for the quote engine.
//!
//! This module loads the pricing policy, the default rate table and any
//! customer-specific rate tables from a single YAML file.
//!
//! # Example
//!
//! ```no_run
//! use quote_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/rates.yaml").unwrap();
//! println!("Pricing policy: {}", config.pricing_policy());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{Customer, RateConfig};

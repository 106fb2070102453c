//! Shift cost-allocation engine for field-service quotes and invoices.
//!
//! This crate splits each shift's hours into normal-time and overtime
//! buckets across its travel-in, on-site and travel-out phases, prices them
//! against a rate table, and folds the results into quote totals.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

//! Error types for the quote engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while allocating and pricing shifts
//! or assembling a quote.

use thiserror::Error;

/// The main error type for the quote engine.
///
/// All fallible operations in the engine return this error type. No partial
/// results are ever returned alongside an error.
///
/// # Example
///
/// ```
/// use quote_engine::error::EngineError;
///
/// let error = EngineError::InvalidTimeFormat {
///     value: "0800".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time format '0800': expected HH:MM");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A start or finish time could not be parsed as `HH:MM`.
    #[error("Invalid time format '{value}': expected HH:MM")]
    InvalidTimeFormat {
        /// The raw value that failed to parse.
        value: String,
    },

    /// A shift contained values the allocator cannot price.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShiftInput {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A rate table was missing a required rate or carried an invalid one.
    #[error("Invalid rate table entry '{key}': {message}")]
    InvalidRateTable {
        /// The rate key at fault.
        key: String,
        /// A description of the problem.
        message: String,
    },

    /// No customer with the given name exists in the rate configuration.
    #[error("Customer not found: {name}")]
    CustomerNotFound {
        /// The customer name that was looked up.
        name: String,
    },

    /// A quote field was invalid.
    #[error("Invalid quote field '{field}': {message}")]
    InvalidQuote {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A quote status change is not allowed from the current status.
    #[error("Cannot move quote from '{from}' to '{to}'")]
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },

    /// The quote is locked in its current status and cannot be edited.
    #[error("Quote is locked while '{status}'")]
    QuoteLocked {
        /// The status that holds the lock.
        status: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_time_format_displays_value() {
        let error = EngineError::InvalidTimeFormat {
            value: "8am".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid time format '8am': expected HH:MM");
    }

    #[test]
    fn test_invalid_shift_input_displays_id_and_message() {
        let error = EngineError::InvalidShiftInput {
            shift_id: "shift_001".to_string(),
            message: "travel_in must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid shift 'shift_001': travel_in must not be negative"
        );
    }

    #[test]
    fn test_invalid_rate_table_displays_key_and_message() {
        let error = EngineError::InvalidRateTable {
            key: "site_normal".to_string(),
            message: "missing required rate".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid rate table entry 'site_normal': missing required rate"
        );
    }

    #[test]
    fn test_customer_not_found_displays_name() {
        let error = EngineError::CustomerNotFound {
            name: "Acme".to_string(),
        };
        assert_eq!(error.to_string(), "Customer not found: Acme");
    }

    #[test]
    fn test_status_transition_displays_both_states() {
        let error = EngineError::InvalidStatusTransition {
            from: "draft".to_string(),
            to: "closed".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot move quote from 'draft' to 'closed'");
    }

    #[test]
    fn test_quote_locked_displays_status() {
        let error = EngineError::QuoteLocked {
            status: "quoted".to_string(),
        };
        assert_eq!(error.to_string(), "Quote is locked while 'quoted'");
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_bad_time() -> EngineResult<()> {
            Err(EngineError::InvalidTimeFormat {
                value: "xx".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_bad_time()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::InvalidTimeFormat { .. })
        ));
    }
}

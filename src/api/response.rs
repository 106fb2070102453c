//! Response types for the quote engine API.
//!
//! This module defines the success and error response structures for the
//! HTTP API, and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::QuoteTotals;
use crate::error::EngineError;
use crate::models::AllocationResult;

/// Response body for the `/quote/summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSummaryResponse {
    /// The quote identifier, echoed or generated.
    pub quote_id: String,
    /// Aggregated quote totals.
    pub totals: QuoteTotals,
    /// One allocation per shift, in request order.
    pub allocations: Vec<AllocationResult>,
    /// Plain-text hour breakdown of every shift.
    pub breakdown_report: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidTimeFormat { .. } => Self::bad_request(ApiError::with_details(
                "INVALID_TIME_FORMAT",
                message,
                "Shift start and finish times must be 24-hour HH:MM values",
            )),
            EngineError::InvalidShiftInput { .. } => Self::bad_request(ApiError::with_details(
                "INVALID_SHIFT",
                message,
                "The shift data contains invalid information",
            )),
            EngineError::InvalidRateTable { .. } => {
                Self::bad_request(ApiError::new("INVALID_RATE_TABLE", message))
            }
            EngineError::CustomerNotFound { name } => Self::bad_request(ApiError::with_details(
                "CUSTOMER_NOT_FOUND",
                message,
                format!("No rate table is configured for customer '{}'", name),
            )),
            EngineError::InvalidQuote { .. } => {
                Self::bad_request(ApiError::new("INVALID_QUOTE", message))
            }
            EngineError::InvalidStatusTransition { .. } => {
                Self::bad_request(ApiError::new("INVALID_STATUS_TRANSITION", message))
            }
            EngineError::QuoteLocked { .. } => {
                Self::bad_request(ApiError::new("QUOTE_LOCKED", message))
            }
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_time_format_error_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::InvalidTimeFormat {
            value: "8am".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_TIME_FORMAT");
        assert!(api_error.error.message.contains("8am"));
    }

    #[test]
    fn test_error_response_carries_status_and_json_body() {
        let response = ApiErrorResponse::from(EngineError::ConfigNotFound {
            path: "rates.yaml".to_string(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(axum::http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_customer_not_found_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::CustomerNotFound {
            name: "Nobody".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "CUSTOMER_NOT_FOUND");
        assert!(api_error.error.details.unwrap().contains("Nobody"));
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let api_error: ApiErrorResponse = EngineError::ConfigParseError {
            path: "rates.yaml".to_string(),
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_quote_errors_map_to_400() {
        let locked: ApiErrorResponse = EngineError::QuoteLocked {
            status: "quoted".to_string(),
        }
        .into();
        assert_eq!(locked.error.code, "QUOTE_LOCKED");

        let invalid: ApiErrorResponse = EngineError::InvalidQuote {
            field: "reporting_time".to_string(),
            message: "must not be negative".to_string(),
        }
        .into();
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
        assert_eq!(invalid.error.code, "INVALID_QUOTE");
    }
}

//! HTTP request handlers for the quote engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{allocate_with_policy, shift_breakdown_report, summarize_quote};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::RateTable;

use super::request::{AllocateRequest, QuoteSummaryRequest};
use super::response::{ApiError, ApiErrorResponse, QuoteSummaryResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/allocate", post(allocate_handler))
        .route("/quote/summary", post(quote_summary_handler))
        .with_state(state)
}

/// Handler for POST /allocate endpoint.
///
/// Allocates and prices a single shift.
async fn allocate_handler(
    State(state): State<AppState>,
    payload: Result<Json<AllocateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing allocation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let config = state.config();
    let rates = match resolve_rates(config, request.rates, request.customer.as_deref()) {
        Ok(rates) => rates,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let start_time = Instant::now();
    match allocate_with_policy(&request.shift, &rates, config.pricing_policy()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                shift_id = %result.shift_id,
                total_hours = %result.breakdown.total_hours,
                cost = %result.cost,
                duration_us = start_time.elapsed().as_micros(),
                "Allocation completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /quote/summary endpoint.
///
/// Allocates every shift on the quote and returns the quote totals along
/// with the per-shift allocations and the plain-text breakdown report.
/// Without explicit rates or a `customer` field, the job's own customer
/// picks the rate table when it is configured.
async fn quote_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<QuoteSummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match build_summary(state.config(), request, correlation_id) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                quote_id = %response.quote_id,
                shifts_count = response.allocations.len(),
                grand_total = %response.totals.grand_total,
                duration_us = start_time.elapsed().as_micros(),
                "Quote summary completed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

fn build_summary(
    config: &ConfigLoader,
    request: QuoteSummaryRequest,
    correlation_id: Uuid,
) -> EngineResult<QuoteSummaryResponse> {
    let quote = request.to_quote(correlation_id.to_string());
    let rates = match (request.rates, request.customer.as_deref()) {
        (None, None) => config
            .customer_rates_or_default(&quote.job_details.customer)
            .clone(),
        (explicit, customer) => resolve_rates(config, explicit, customer)?,
    };
    let policy = config.pricing_policy();

    let summary = summarize_quote(&quote, &rates, policy)?;
    let breakdown_report = shift_breakdown_report(&quote.shifts, &rates, policy)?;

    Ok(QuoteSummaryResponse {
        quote_id: quote.id,
        totals: summary.totals,
        allocations: summary.allocations,
        breakdown_report,
    })
}

/// Explicit rates win over the customer's table, which wins over the
/// default table.
fn resolve_rates(
    config: &ConfigLoader,
    explicit: Option<RateTable>,
    customer: Option<&str>,
) -> EngineResult<RateTable> {
    match explicit {
        Some(rates) => Ok(rates),
        None => config.resolve_rates(customer).cloned(),
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, including rate table
            // validation failures raised during deserialization.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("Invalid rate table entry") {
                ApiError::new("INVALID_RATE_TABLE", body_text)
            } else if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

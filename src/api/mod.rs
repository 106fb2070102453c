//! HTTP API module for the quote engine.
//!
//! This module provides the REST endpoints for allocating single shifts and
//! summarising whole quotes against the configured rate tables.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AllocateRequest, QuoteSummaryRequest};
pub use response::{ApiError, ApiErrorResponse, QuoteSummaryResponse};
pub use state::AppState;

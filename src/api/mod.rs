//! HTTP API module for the offset engine.
//!
//! This module provides the REST endpoints for resolving drill pay and
//! estimating the VA offset, plus inspection and hot reload of the pay table.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{create_router, perform_estimate};
pub use request::{EstimateRequest, MilitaryPayRequest, ResolvePayRequest};
pub use response::{ApiError, ApiErrorResponse, ResolvePayResponse, TableSummary};
pub use state::AppState;

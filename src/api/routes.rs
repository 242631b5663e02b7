//! API route configuration.

use crate::api::handlers::partners_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public, read-only API routes.
///
/// # Endpoints
///
/// - `GET /partners` - Filtered partners with map markers
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/partners", get(partners_handler))
}

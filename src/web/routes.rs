//! Web route configuration.

use crate::state::AppState;
use crate::web::handlers::map_handler;
use axum::{Router, routing::get};

/// Public page routes.
///
/// # Endpoints
///
/// - `GET /` - Partner map with filter form
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/", get(map_handler))
}

//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{DataSourceCheck, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Partner table loaded
/// - **503 Service Unavailable**: Partner table missing or unreadable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "data_source": {
///       "status": "ok",
///       "source": "assistencia.csv",
///       "partners": 42,
///       "loaded_at": "2026-01-01T12:00:00Z"
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let data_source = match state.partner_service.table().await {
        Ok(table) => DataSourceCheck::loaded(&table),
        Err(e) => DataSourceCheck::failed(state.partner_service.source(), &e),
    };

    let response = HealthResponse::new(data_source);
    if response.is_healthy() {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

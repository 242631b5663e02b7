//! Handler for partner search.

use axum::{
    Json,
    extract::{RawQuery, State},
};

use crate::api::dto::filter::parse_filter_query;
use crate::api::dto::partners::PartnersResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Filters partners and returns map markers.
///
/// # Endpoint
///
/// `GET /api/partners`
///
/// # Query Parameters
///
/// - `region` (repeatable): Selected regions (default: all observed)
/// - `city` (optional): Case-insensitive city substring
/// - `service` (repeatable): Selected service tags (default: all observed)
/// - `filtered` (optional): Treat absent facets as empty selections
///
/// # Response
///
/// ```json
/// {
///   "total": 2,
///   "mapped": 2,
///   "markers": [
///     {
///       "coordinates": { "lat": -22.9, "lon": -47.06 },
///       "tooltip_text": "Oficina Campinas",
///       "popup_html": "<div ...>...</div>",
///       "whatsapp_link": "https://wa.me/5519999990000?text=..."
///     }
///   ],
///   "warnings": [],
///   "facets": { "regions": ["RJ", "SP"], "services": ["Reparo"] },
///   "filter": { "regions": ["SP"], "city_query": "", "services": ["Reparo"] },
///   "map": { "center": [-14.235, -51.9253], "zoom": 4, ... }
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the city query is too long
/// - 503 Service Unavailable if the partner table cannot be loaded
pub async fn partners_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<PartnersResponse>, AppError> {
    let selection = parse_filter_query(query.as_deref())?;
    let outcome = state.partner_service.search(&selection).await?;

    Ok(Json(PartnersResponse::new(outcome, state.map)))
}

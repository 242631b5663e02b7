//! Partner map page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{RawQuery, State},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeSet;

use crate::api::dto::filter::parse_filter_query;
use crate::api::dto::partners::MapView;
use crate::domain::entities::{ColumnWarning, MarkerPayload};
use crate::error::AppError;
use crate::state::AppState;

/// One checkbox of a facet widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetChoice {
    pub value: String,
    pub selected: bool,
}

/// Template for the partner map page.
///
/// Renders `templates/map.html` with:
/// - Facet form (regions, city search, services)
/// - Result count, column warnings and the "no results" notice
/// - Leaflet map fed from an embedded JSON payload
#[derive(Template, WebTemplate)]
#[template(path = "map.html")]
pub struct MapTemplate {
    pub total: usize,
    pub mapped: usize,
    pub city_query: String,
    pub regions: Vec<FacetChoice>,
    pub services: Option<Vec<FacetChoice>>,
    pub warnings: Vec<ColumnWarning>,
    pub no_results: bool,
    /// JSON consumed by the map script, safe to embed in a `<script>` element.
    pub payload_json: String,
}

/// Template shown when the page cannot be rendered at all.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
}

#[derive(Serialize)]
struct MapPayload<'a> {
    map: MapView,
    markers: &'a [MarkerPayload],
}

/// Renders the partner map page.
///
/// # Endpoint
///
/// `GET /`
///
/// Accepts the same query parameters as `GET /api/partners`. Each form
/// submission re-runs the full filter cycle on the server.
///
/// # Errors
///
/// Renders `templates/error.html` with the error's status code (503 when
/// the partner table is unavailable). No partial map is shown.
pub async fn map_handler(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    match render_map(&state, query.as_deref()).await {
        Ok(page) => page.into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Map page not rendered");
            (
                e.status(),
                ErrorTemplate {
                    message: e.to_string(),
                },
            )
                .into_response()
        }
    }
}

async fn render_map(state: &AppState, query: Option<&str>) -> Result<MapTemplate, AppError> {
    let selection = parse_filter_query(query)?;
    let outcome = state.partner_service.search(&selection).await?;
    let payload_json = script_payload(&outcome.markers, state.map.into())?;

    Ok(MapTemplate {
        total: outcome.total,
        mapped: outcome.mapped(),
        no_results: outcome.is_empty(),
        regions: choices(&outcome.facets.regions, &outcome.spec.regions),
        services: outcome.facets.services.as_ref().map(|options| {
            let selected = outcome.spec.services.clone().unwrap_or_default();
            choices(options, &selected)
        }),
        city_query: outcome.spec.city_query.clone(),
        warnings: outcome.warnings,
        payload_json,
    })
}

fn choices(options: &[String], selected: &BTreeSet<String>) -> Vec<FacetChoice> {
    options
        .iter()
        .map(|value| FacetChoice {
            value: value.clone(),
            selected: selected.contains(value),
        })
        .collect()
}

/// Serializes markers for inline embedding.
///
/// Every `<` is written as `\u003c`, so no partner field can close the
/// surrounding script element or open an HTML comment inside it.
fn script_payload(markers: &[MarkerPayload], map: MapView) -> Result<String, AppError> {
    let payload = MapPayload { map, markers };

    serde_json::to_string(&payload)
        .map(|json| json.replace('<', "\\u003c"))
        .map_err(|e| {
            AppError::internal(
                "Failed to serialize map payload",
                json!({ "reason": e.to_string() }),
            )
        })
}

//! DTOs for the partner search endpoint.

use serde::Serialize;

use crate::application::services::{FacetOptions, SearchOutcome};
use crate::config::MapSettings;
use crate::domain::entities::{ColumnWarning, MarkerPayload};
use crate::domain::filter::FilterSpec;

/// Notice attached when no partner matches the filter.
pub const NO_RESULTS_NOTICE: &str = "no_results";

/// Icon drawn for every partner marker (Font Awesome via Leaflet.awesome-markers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerIcon {
    pub color: &'static str,
    pub icon: &'static str,
    pub prefix: &'static str,
}

pub const PARTNER_ICON: MarkerIcon = MarkerIcon {
    color: "orange",
    icon: "wrench",
    prefix: "fa",
};

/// Map widget settings sent alongside the markers.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    pub icon: MarkerIcon,
    pub popup_max_width: u16,
}

impl From<MapSettings> for MapView {
    fn from(settings: MapSettings) -> Self {
        Self {
            center: [settings.center_lat, settings.center_lon],
            zoom: settings.zoom,
            icon: PARTNER_ICON,
            popup_max_width: 300,
        }
    }
}

/// Response of `GET /api/partners`.
#[derive(Debug, Serialize)]
pub struct PartnersResponse {
    /// Matching rows, including rows without coordinates.
    pub total: usize,
    /// Matching rows placed on the map.
    pub mapped: usize,
    pub markers: Vec<MarkerPayload>,
    pub warnings: Vec<ColumnWarning>,
    pub facets: FacetOptions,
    pub filter: FilterSpec,
    pub map: MapView,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

impl PartnersResponse {
    pub fn new(outcome: SearchOutcome, map: MapSettings) -> Self {
        let notice = outcome.is_empty().then_some(NO_RESULTS_NOTICE);
        Self {
            total: outcome.total,
            mapped: outcome.mapped(),
            markers: outcome.markers,
            warnings: outcome.warnings,
            facets: outcome.facets,
            filter: outcome.spec,
            map: map.into(),
            notice,
        }
    }
}

//! Map marker payload produced for each located partner.

use serde::Serialize;

/// A validated map position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Returns `None` unless both values are finite and within WGS84 range.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);

        valid.then_some(Self { lat, lon })
    }
}

/// Everything the map needs to draw one pin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPayload {
    pub coordinates: Coordinates,
    pub tooltip_text: String,
    pub popup_html: String,
    pub whatsapp_link: String,
}

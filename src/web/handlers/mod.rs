//! HTML template rendering handlers for the partner map.

mod map;

pub use map::{ErrorTemplate, FacetChoice, MapTemplate, map_handler};

//! Filter query string parsing.
//!
//! Facet parameters are repeatable, which serde's urlencoded deserializer
//! cannot express, so the raw query is walked pair by pair.

use serde_json::json;
use url::form_urlencoded;

use crate::domain::filter::FilterSelection;
use crate::error::AppError;

/// Upper bound on the city search text, in characters.
pub const MAX_CITY_QUERY_CHARS: usize = 100;

/// Parses `region`, `service`, `city` and `filtered` query parameters.
///
/// # Semantics
///
/// - A facet with no parameters is unset and defaults to every observed value
/// - `filtered=1` marks a submitted form: unset facets become empty selections,
///   because unchecked checkboxes send nothing
/// - `region=` (empty value) touches the facet without selecting anything
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the city query exceeds
/// [`MAX_CITY_QUERY_CHARS`].
pub fn parse_filter_query(raw: Option<&str>) -> Result<FilterSelection, AppError> {
    let mut regions: Option<Vec<String>> = None;
    let mut services: Option<Vec<String>> = None;
    let mut city = None;
    let mut submitted = false;

    for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
        match key.as_ref() {
            "region" => push_value(&mut regions, value.trim()),
            "service" => push_value(&mut services, value.trim()),
            "city" => city = Some(value.into_owned()),
            "filtered" => submitted = true,
            _ => {}
        }
    }

    if let Some(query) = &city {
        let length = query.chars().count();
        if length > MAX_CITY_QUERY_CHARS {
            return Err(AppError::bad_request(
                "City query is too long",
                json!({ "max_chars": MAX_CITY_QUERY_CHARS, "got": length }),
            ));
        }
    }

    if submitted {
        regions.get_or_insert_with(Vec::new);
        services.get_or_insert_with(Vec::new);
    }

    Ok(FilterSelection {
        regions,
        city,
        services,
    })
}

fn push_value(target: &mut Option<Vec<String>>, value: &str) {
    let values = target.get_or_insert_with(Vec::new);
    if !value.is_empty() {
        values.push(value.to_string());
    }
}

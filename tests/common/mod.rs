#![allow(dead_code)]

use partner_map::config::MapSettings;
use partner_map::infrastructure::persistence::CsvPartnerRepository;
use partner_map::state::AppState;
use std::sync::Arc;

pub const PARTNERS_CSV: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/partners.csv");
pub const NO_REGION_CSV: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/no_region.csv");
pub const BLANK_FACETS_CSV: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/blank_facets.csv");
pub const MISSING_CSV: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/missing.csv");

pub fn create_test_state(path: &str) -> AppState {
    let repository = Arc::new(CsvPartnerRepository::new(path));
    AppState::new(repository, MapSettings::default())
}

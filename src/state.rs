//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::PartnerService;
use crate::config::MapSettings;
use crate::infrastructure::persistence::CsvPartnerRepository;

/// Handler state.
///
/// Cloned per request; the partner table behind the service is shared and
/// read-only, so requests never contend on it.
#[derive(Clone)]
pub struct AppState {
    pub partner_service: Arc<PartnerService<CsvPartnerRepository>>,
    pub map: MapSettings,
}

impl AppState {
    pub fn new(repository: Arc<CsvPartnerRepository>, map: MapSettings) -> Self {
        Self {
            partner_service: Arc::new(PartnerService::new(repository)),
            map,
        }
    }
}

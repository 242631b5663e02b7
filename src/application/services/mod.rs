//! Business logic services for the application layer.

pub mod partner_service;

pub use partner_service::{FacetOptions, PartnerService, SearchOutcome};

//! # Partner Map
//!
//! An interactive map of partner service locations built with Axum.
//!
//! A static table of partners is loaded from a delimited file, filtered by
//! region, city and service type, and rendered as map pins with
//! click-to-chat WhatsApp links.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Partner entities, filter engine, marker builder
//! - **Application Layer** ([`application`]) - The per-request search cycle
//! - **Infrastructure Layer** ([`infrastructure`]) - File-backed record store
//! - **API Layer** ([`api`]) - JSON endpoint, DTOs and middleware
//! - **Web Layer** ([`web`]) - Server-rendered map page
//!
//! ## Quick Start
//!
//! ```bash
//! export DATA_FILE="assistencia.csv"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{PartnerService, SearchOutcome};
    pub use crate::domain::entities::{MarkerPayload, PartnerRecord, PartnerTable};
    pub use crate::domain::filter::{FilterSelection, FilterSpec};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::CsvPartnerRepository;
    pub use crate::state::AppState;
}

//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose a small API to the HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::partner_service::PartnerService`] - Partner filtering and map markers

pub mod services;

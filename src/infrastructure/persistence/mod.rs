//! Record store implementations.
//!
//! # Repositories
//!
//! - [`CsvPartnerRepository`] - Partner table read from a delimited file

pub mod csv_partner_repository;

pub use csv_partner_repository::{CsvPartnerRepository, parse_table};

//! Domain layer: partner entities and the filter-and-render pipeline.
//!
//! # Architecture
//!
//! - [`entities`] - Partner records, the shared table and marker payloads
//! - [`repositories`] - Record store trait
//! - [`filter`] - Facet filtering over the table
//! - [`markers`] - Marker and contact link construction
//!
//! # Pipeline
//!
//! 1. The record store loads the table once ([`repositories::PartnerRepository`])
//! 2. A [`filter::FilterSpec`] is resolved from the request
//! 3. [`filter::apply`] selects the matching rows
//! 4. [`markers::build`] turns each located row into a pin
//!
//! Nothing in this layer depends on HTTP or the file format.

pub mod entities;
pub mod filter;
pub mod markers;
pub mod repositories;

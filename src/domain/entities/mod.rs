//! Core domain entities.
//!
//! - [`PartnerRecord`] - One row of the source table
//! - [`PartnerTable`] - The immutable table shared by all requests
//! - [`MarkerPayload`] - Map pin derived from a located record
//!
//! Entities are plain data; filtering and marker construction live in
//! [`crate::domain::filter`] and [`crate::domain::markers`].

pub mod marker;
pub mod partner;

pub use marker::{Coordinates, MarkerPayload};
pub use partner::{Column, ColumnSet, ColumnWarning, PartnerRecord, PartnerTable};

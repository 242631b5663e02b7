//! Infrastructure layer for external integrations.
//!
//! Implements the record store trait defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - File-backed partner repository

pub mod persistence;

//! Repository trait definitions for the domain layer.
//!
//! The record store is abstracted behind [`PartnerRepository`] so services can
//! be tested against a `mockall` mock while production reads a delimited file
//! (see `crate::infrastructure::persistence`).

pub mod partner_repository;

pub use partner_repository::PartnerRepository;

#[cfg(test)]
pub use partner_repository::MockPartnerRepository;

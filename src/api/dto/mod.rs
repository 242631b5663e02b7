//! Data Transfer Objects for API requests and responses.

pub mod filter;
pub mod health;
pub mod partners;

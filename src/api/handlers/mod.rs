//! HTTP request handlers for API endpoints.

pub mod health;
pub mod partners;

pub use health::health_handler;
pub use partners::partners_handler;

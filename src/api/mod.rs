//! REST API layer for HTTP request/response handling.
//!
//! # Modules
//!
//! - [`dto`] - Query parsing and response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing and rate limiting
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

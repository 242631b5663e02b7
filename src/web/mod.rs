//! Web layer for the browser-based partner map.
//!
//! Server-side rendering with Askama templates; the map itself is drawn by
//! Leaflet from a JSON payload embedded in the page.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod routes;

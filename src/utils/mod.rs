//! Utility functions for contact normalization and markup.
//!
//! - [`phone`] - Phone number normalization
//! - [`contact_link`] - WhatsApp deep link construction
//! - [`html`] - HTML escaping for popup content

pub mod contact_link;
pub mod html;
pub mod phone;

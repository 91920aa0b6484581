//! Helper functions shared by the API and application layers.
//!
//! - [`member_id`] - Login identifier validation

pub mod member_id;

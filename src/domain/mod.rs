//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Core data structures (members, teams, login input/output)
//! - [`repositories`] - Data access trait definitions and the member query
//!   specification
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business logic lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;

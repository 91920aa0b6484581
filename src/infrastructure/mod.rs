//! Infrastructure layer for external integrations.
//!
//! Implements interfaces defined by the domain and application layers.
//!
//! # Modules
//!
//! - [`auth`] - JWT tokens and Argon2 password hashing
//! - [`observability`] - Prometheus metrics export
//! - [`persistence`] - PostgreSQL repository implementations

pub mod auth;
pub mod observability;
pub mod persistence;

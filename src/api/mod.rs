//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into domain operations and formats
//! responses according to API contracts.
//!
//! # Modules
//!
//! - [`cookie`] - Auth cookie rendering
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting, CORS and tracing middleware
//! - [`openapi`] - Generated OpenAPI document
//! - [`routes`] - Route configuration and composition

pub mod cookie;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;

//! Application layer services implementing business logic.
//!
//! Services consume repository traits and collaborator traits passed in at
//! construction time, and provide a clean API for HTTP handlers and the
//! admin CLI.
//!
//! # Available Services
//!
//! - [`services::member_service::MemberService`] - Credential verification and member management
//! - [`services::team_service::TeamService`] - Team management

pub mod services;

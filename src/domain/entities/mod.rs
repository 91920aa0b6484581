//! Core domain entities representing the membership data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`Member`] - A member account with a login identifier and team
//! - [`Team`] - A named grouping of members
//! - [`MemberProfile`] - Member joined with its team name (query projection)
//! - [`LoginCredentials`] / [`LoginResult`] - Per-request login input and output
//!
//! Creation inputs use separate `New*` structs (`NewMember`, `NewTeam`).

pub mod member;
pub mod team;

pub use member::{LoginCredentials, LoginResult, Member, MemberProfile, NewMember};
pub use team::{NewTeam, Team};

//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries
//! are checked at runtime; the schema lives in `migrations/`.
//!
//! # Repositories
//!
//! - [`PgMemberRepository`] - Member lookups (fetch-join or two-step) and creation
//! - [`PgTeamRepository`] - Team management

pub mod pg_member_repository;
pub mod pg_team_repository;

pub use pg_member_repository::PgMemberRepository;
pub use pg_team_repository::PgTeamRepository;

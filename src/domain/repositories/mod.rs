//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`MemberRepository`] - Member lookups driven by [`MemberQuery`]
//! - [`TeamRepository`] - Team management
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod member_repository;
pub mod team_repository;

pub use member_repository::{
    JoinStrategy, MemberFilter, MemberQuery, MemberRepository, Projection,
};
pub use team_repository::TeamRepository;

#[cfg(test)]
pub use member_repository::MockMemberRepository;
#[cfg(test)]
pub use team_repository::MockTeamRepository;

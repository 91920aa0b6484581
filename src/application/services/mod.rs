//! Business logic services for the application layer.

pub mod member_service;
pub mod team_service;

pub use member_service::MemberService;
pub use team_service::TeamService;

//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod login;
pub mod refresh;

pub use health::health_handler;
pub use login::login_handler;
pub use refresh::refresh_handler;

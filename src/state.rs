//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::api::cookie::AuthCookie;
use crate::application::services::MemberService;
use crate::infrastructure::auth::TokenProvider;

/// Collaborators used by the HTTP layer.
///
/// All fields are behind `Arc`, so cloning the state per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub member_service: Arc<MemberService>,
    pub token_provider: Arc<dyn TokenProvider>,
    pub auth_cookie: Arc<AuthCookie>,
}

impl AppState {
    pub fn new(
        member_service: Arc<MemberService>,
        token_provider: Arc<dyn TokenProvider>,
        auth_cookie: Arc<AuthCookie>,
    ) -> Self {
        Self {
            member_service,
            token_provider,
            auth_cookie,
        }
    }
}

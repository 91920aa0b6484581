//! Authentication cookie writer.

use axum::http::{HeaderMap, HeaderValue, header::SET_COOKIE};
use chrono::Duration;
use serde_json::json;

use crate::error::AppError;

/// Writes the access token into a `Set-Cookie` response header.
///
/// # Cookie Format
///
/// ```text
/// Set-Cookie: accessToken=<token>; Path=/; Max-Age=1800; HttpOnly; SameSite=Lax; Secure
/// ```
///
/// `Secure` is omitted when the writer is built with `secure = false`, which
/// is only meant for plain-HTTP local development.
#[derive(Debug, Clone)]
pub struct AuthCookie {
    name: String,
    max_age: Duration,
    secure: bool,
}

impl AuthCookie {
    pub fn new(name: impl Into<String>, max_age: Duration, secure: bool) -> Self {
        Self {
            name: name.into(),
            max_age,
            secure,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders the full `Set-Cookie` value for `token`.
    pub fn render(&self, token: &str) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.name,
            token,
            self.max_age.num_seconds()
        );

        if self.secure {
            cookie.push_str("; Secure");
        }

        cookie
    }

    /// Appends the auth cookie to `headers`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the token contains characters that are
    /// not valid in a header value.
    pub fn set_auth_cookie(&self, headers: &mut HeaderMap, token: &str) -> Result<(), AppError> {
        let value = HeaderValue::from_str(&self.render(token)).map_err(|e| {
            AppError::internal(
                "Invalid auth cookie value",
                json!({ "reason": e.to_string() }),
            )
        })?;

        headers.append(SET_COOKIE, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_secure_cookie() {
        let cookie = AuthCookie::new("accessToken", Duration::seconds(1800), true);

        assert_eq!(
            cookie.render("abc.def.ghi"),
            "accessToken=abc.def.ghi; Path=/; Max-Age=1800; HttpOnly; SameSite=Lax; Secure"
        );
    }

    #[test]
    fn test_render_insecure_cookie() {
        let cookie = AuthCookie::new("session", Duration::seconds(60), false);

        assert!(!cookie.render("t").contains("Secure"));
    }

    #[test]
    fn test_set_auth_cookie_appends_one_header() {
        let cookie = AuthCookie::new("accessToken", Duration::seconds(60), true);
        let mut headers = HeaderMap::new();

        cookie.set_auth_cookie(&mut headers, "token").unwrap();

        assert_eq!(headers.get_all(SET_COOKIE).iter().count(), 1);
    }

    #[test]
    fn test_set_auth_cookie_rejects_control_characters() {
        let cookie = AuthCookie::new("accessToken", Duration::seconds(60), true);
        let mut headers = HeaderMap::new();

        let result = cookie.set_auth_cookie(&mut headers, "bad\ntoken");

        assert!(matches!(result, Err(AppError::Internal { .. })));
        assert!(headers.is_empty());
    }
}

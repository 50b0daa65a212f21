//! Session gate.
//!
//! [`RequireUser`] is the only way a handler obtains a [`UserId`]. It looks
//! for a session token in the session cookie first, then in an
//! `Authorization: Bearer` header, and resolves it through the configured
//! [`SessionStore`](jotter_core::SessionStore). Anything else is answered
//! with a redirect to the login page carrying the original path.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
};
use tracing::{debug, warn};

use jotter_core::{logging, UserId};

use crate::config::AuthSettings;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller.
#[derive(Debug, Clone)]
pub struct RequireUser {
    pub user_id: UserId,
    /// Raw token the session was resolved from.
    pub token: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let return_to = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let login_url = state.auth.login_url(return_to);

        let Some(token) = session_token(&parts.headers, &state.auth.cookie_name) else {
            debug!(subsystem = "api", op = "resolve_session", "No session token presented");
            return Err(ApiError::Unauthenticated { login_url });
        };

        match state.sessions.resolve(&token).await {
            Ok(Some(user_id)) => {
                tracing::Span::current().record(logging::USER_ID, tracing::field::display(user_id));
                Ok(RequireUser { user_id, token })
            }
            Ok(None) => {
                warn!(
                    subsystem = "api",
                    op = "resolve_session",
                    "Unknown or expired session token"
                );
                Err(ApiError::Unauthenticated { login_url })
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Extract the session token from the cookie or bearer header.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookies| cookie_value(cookies, cookie_name))
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        })
}

fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(auth: &AuthSettings) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        auth.cookie_name
    ))
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_token_from_cookie() {
        let h = headers(&[(header::COOKIE, "theme=dark; __session=abc123; lang=en")]);
        assert_eq!(session_token(&h, "__session").as_deref(), Some("abc123"));
    }

    #[test]
    fn test_cookie_wins_over_bearer() {
        let h = headers(&[
            (header::COOKIE, "__session=from-cookie"),
            (header::AUTHORIZATION, "Bearer from-header"),
        ]);
        assert_eq!(session_token(&h, "__session").as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_bearer_fallback() {
        let h = headers(&[(header::AUTHORIZATION, "Bearer tok")]);
        assert_eq!(session_token(&h, "__session").as_deref(), Some("tok"));
    }

    #[test]
    fn test_no_token() {
        let h = headers(&[
            (header::COOKIE, "__sessionx=nope; other=1"),
            (header::AUTHORIZATION, "Basic dXNlcjpwYXNz"),
        ]);
        assert_eq!(session_token(&h, "__session"), None);
    }

    #[test]
    fn test_empty_cookie_value_is_ignored() {
        let h = headers(&[(header::COOKIE, "__session=")]);
        assert_eq!(session_token(&h, "__session"), None);
    }

    #[test]
    fn test_clear_cookie_header() {
        let auth = AuthSettings::default();
        let cleared = clear_session_cookie(&auth).unwrap();
        assert_eq!(
            cleared.to_str().unwrap(),
            "__session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
        );
    }
}

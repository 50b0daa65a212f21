//! Session teardown.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use tracing::info;

use crate::error::ApiError;
use crate::session::{clear_session_cookie, RequireUser};
use crate::state::AppState;

/// `POST /logout`: revoke the caller's session and clear the cookie.
pub async fn logout(
    user: RequireUser,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    state.sessions.revoke(&user.token).await?;
    info!(subsystem = "api", op = "logout", user_id = %user.user_id, "Session revoked");

    let mut response = Redirect::to("/").into_response();
    if let Some(cookie) = clear_session_cookie(&state.auth) {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    Ok(response)
}

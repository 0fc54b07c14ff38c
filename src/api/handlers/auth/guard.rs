//! Session guard for admin-only endpoints.

use crate::api::handlers::auth::{LOGIN_ROUTE, session, session::SessionPayload, state::AuthConfig, utils};
use axum::{
    http::{HeaderMap, HeaderValue, StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

/// Resolve the verified session for a request, or the redirect that
/// bounces an unauthenticated browser back to the login form.
pub(super) fn require_admin(
    config: &AuthConfig,
    headers: &HeaderMap,
) -> Result<SessionPayload, Response> {
    utils::extract_cookie(headers, config.session_cookie_name())
        .and_then(|cookie| session::verify(config, &cookie))
        .ok_or_else(|| {
            let mut response_headers = HeaderMap::new();
            response_headers.insert(LOCATION, HeaderValue::from_static(LOGIN_ROUTE));
            (StatusCode::SEE_OTHER, response_headers).into_response()
        })
}

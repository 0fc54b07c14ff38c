//! Post-login CSRF checks.
//!
//! Authenticated mutating requests must echo the per-session CSRF secret
//! in the form body. The reference value always comes from the verified
//! session cookie, never from anything else the client sent.

use crate::api::handlers::auth::{session, signer, state::AuthConfig, utils};
use axum::http::HeaderMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CsrfError {
    #[error("Missing CSRF token")]
    MissingToken,
    #[error("Invalid session")]
    InvalidSession,
    #[error("Invalid CSRF token")]
    TokenMismatch,
}

/// Require a valid CSRF token for the session carried by `headers`.
///
/// Checks run cheapest-first: a missing token never touches the session
/// cookie, and the constant-time comparison only happens once the cookie
/// verified.
pub(super) fn require(
    config: &AuthConfig,
    headers: &HeaderMap,
    submitted: &str,
) -> Result<(), CsrfError> {
    if submitted.is_empty() {
        return Err(CsrfError::MissingToken);
    }
    let cookie = utils::extract_cookie(headers, config.session_cookie_name())
        .ok_or(CsrfError::InvalidSession)?;
    let payload = session::verify(config, &cookie).ok_or(CsrfError::InvalidSession)?;
    if !signer::ct_eq_str(&payload.csrf_secret, submitted) {
        return Err(CsrfError::TokenMismatch);
    }
    Ok(())
}

/// The CSRF secret of the current session, for embedding into forms.
///
/// Returns an empty string when there is no verifiable session; a form
/// rendered with it will simply fail [`require`] later.
pub(super) fn current_token(config: &AuthConfig, headers: &HeaderMap) -> String {
    utils::extract_cookie(headers, config.session_cookie_name())
        .and_then(|cookie| session::verify(config, &cookie))
        .map_or_else(String::new, |payload| payload.csrf_secret)
}

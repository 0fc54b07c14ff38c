//! Pre-login CSRF handshake.
//!
//! The login form is served to anonymous clients, so the usual
//! session-bound CSRF secret does not exist yet. Instead the form `GET`
//! issues a short-lived token `timestamp.nonce.hex_signature`, stores the
//! whole token in a cookie and embeds only the nonce in the form. A login
//! `POST` must present both halves; either alone is useless.

use crate::api::handlers::auth::{signer, state::AuthConfig, utils};
use anyhow::Result;
use axum::http::{HeaderValue, header::InvalidHeaderValue};

/// How long an issued login form stays submittable.
pub(super) const PRELOGIN_TTL_SECONDS: u64 = 600;

/// Mint a pre-login token bound to the current clock.
pub(super) fn issue(config: &AuthConfig) -> Result<String> {
    let timestamp = utils::unix_now();
    let nonce = utils::random_token()?;
    let signature = signer::sign(
        config.session_secret(),
        format!("{timestamp}.{nonce}").as_bytes(),
    );
    Ok(format!("{timestamp}.{nonce}.{}", hex::encode(signature)))
}

/// The form-embeddable half of a pre-login token.
pub(super) fn nonce(token: &str) -> Option<&str> {
    token.split('.').nth(1)
}

/// Check a submitted login form against the pre-login cookie.
pub(super) fn verify(config: &AuthConfig, cookie_token: Option<&str>, form_nonce: &str) -> bool {
    verify_at(config, cookie_token, form_nonce, utils::unix_now())
}

/// Clock-explicit variant of [`verify`].
///
/// The token must carry a valid signature, be no older than
/// [`PRELOGIN_TTL_SECONDS`] (the boundary second still passes), and its
/// nonce must match the form value in constant time.
pub(super) fn verify_at(
    config: &AuthConfig,
    cookie_token: Option<&str>,
    form_nonce: &str,
    now: u64,
) -> bool {
    let Some(token) = cookie_token else {
        return false;
    };
    if form_nonce.is_empty() {
        return false;
    }
    let mut parts = token.splitn(3, '.');
    let (Some(timestamp_raw), Some(nonce), Some(signature_hex)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Ok(timestamp) = timestamp_raw.parse::<u64>() else {
        return false;
    };

    let expected = hex::encode(signer::sign(
        config.session_secret(),
        format!("{timestamp_raw}.{nonce}").as_bytes(),
    ));
    let good = signer::ct_eq_str(&expected, signature_hex);
    let fresh = now.saturating_sub(timestamp) <= PRELOGIN_TTL_SECONDS;

    good && fresh && signer::ct_eq_str(nonce, form_nonce)
}

pub(super) fn prelogin_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    utils::cookie_header(
        config.prelogin_cookie_name(),
        token,
        config.cookie_same_site(),
        PRELOGIN_TTL_SECONDS,
        config.cookie_secure(),
    )
}

pub(super) fn clear_prelogin_cookie(
    config: &AuthConfig,
) -> Result<HeaderValue, InvalidHeaderValue> {
    utils::cookie_header(
        config.prelogin_cookie_name(),
        "",
        config.cookie_same_site(),
        0,
        config.cookie_secure(),
    )
}

//! Signed session cookies.
//!
//! A session token is `base64url(payload).base64url(signature)` where the
//! payload is compact JSON and the signature is HMAC-SHA256 over the exact
//! payload bytes. Tokens are self-contained; nothing is stored server-side.

use crate::api::handlers::auth::{signer, state::AuthConfig, utils};
use anyhow::{Context, Result};
use axum::http::{HeaderValue, header::InvalidHeaderValue};
use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};

/// Claims carried by a session cookie.
///
/// Field order matters: serialization follows declaration order and the
/// signature covers the serialized bytes, so keys stay alphabetical to keep
/// tokens stable across releases.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SessionPayload {
    /// Per-session CSRF secret echoed by mutating form posts.
    pub csrf_secret: String,
    /// Unix seconds at issue (or last rotation) time.
    pub issued_at: u64,
    /// The authenticated admin principal.
    pub subject: String,
}

/// Issue a fresh session token for `subject`.
pub(super) fn issue(config: &AuthConfig, subject: &str) -> Result<String> {
    let payload = SessionPayload {
        csrf_secret: utils::random_token()?,
        issued_at: utils::unix_now(),
        subject: subject.to_string(),
    };
    encode(config, &payload)
}

/// Re-sign an existing session with a new CSRF secret and a fresh
/// `issued_at`, extending its lifetime.
pub(super) fn rotate(
    config: &AuthConfig,
    payload: &SessionPayload,
) -> Result<(SessionPayload, String)> {
    let rotated = SessionPayload {
        csrf_secret: utils::random_token()?,
        issued_at: utils::unix_now(),
        subject: payload.subject.clone(),
    };
    let token = encode(config, &rotated)?;
    Ok((rotated, token))
}

/// Verify a session token against the current clock.
pub(super) fn verify(config: &AuthConfig, token: &str) -> Option<SessionPayload> {
    verify_at(config, token, utils::unix_now())
}

/// Verify a session token at an explicit point in time.
///
/// Fails closed: any malformed input, bad signature, expired or empty
/// claim yields `None`. A token is still valid at exactly
/// `issued_at + max_age` and invalid one second later.
pub(super) fn verify_at(config: &AuthConfig, token: &str, now: u64) -> Option<SessionPayload> {
    let (payload_b64, signature_b64) = token.split_once('.')?;
    let raw = Base64UrlUnpadded::decode_vec(payload_b64).ok()?;
    let signature = Base64UrlUnpadded::decode_vec(signature_b64).ok()?;
    if !signer::ct_eq(&signer::sign(config.session_secret(), &raw), &signature) {
        return None;
    }
    let payload: SessionPayload = serde_json::from_slice(&raw).ok()?;
    if now > payload.issued_at.saturating_add(config.session_max_age_seconds()) {
        return None;
    }
    if payload.subject.is_empty() || payload.csrf_secret.is_empty() {
        return None;
    }
    Some(payload)
}

fn encode(config: &AuthConfig, payload: &SessionPayload) -> Result<String> {
    let raw = serde_json::to_vec(payload).context("Failed to serialize session payload")?;
    let signature = signer::sign(config.session_secret(), &raw);
    Ok(format!(
        "{}.{}",
        Base64UrlUnpadded::encode_string(&raw),
        Base64UrlUnpadded::encode_string(&signature)
    ))
}

pub(super) fn session_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    utils::cookie_header(
        config.session_cookie_name(),
        token,
        config.cookie_same_site(),
        config.session_max_age_seconds(),
        config.cookie_secure(),
    )
}

pub(super) fn clear_session_cookie(
    config: &AuthConfig,
) -> Result<HeaderValue, InvalidHeaderValue> {
    utils::cookie_header(
        config.session_cookie_name(),
        "",
        config.cookie_same_site(),
        0,
        config.cookie_secure(),
    )
}

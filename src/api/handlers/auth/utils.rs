//! Small helpers shared across the auth handlers.

use anyhow::{Context, Result};
use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{RngCore, rngs::OsRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Build a `Set-Cookie` value. Every cookie this service issues is
/// `HttpOnly` and scoped to `/`; a `max_age` of zero deletes the cookie.
pub(super) fn cookie_header(
    name: &str,
    value: &str,
    same_site: &str,
    max_age: u64,
    secure: bool,
) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    let mut cookie =
        format!("{name}={value}; Path=/; HttpOnly; SameSite={same_site}; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Seconds since the Unix epoch. Clocks before the epoch read as zero.
pub(super) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

/// 32 bytes of OS randomness, URL-safe base64 encoded.
pub(super) fn random_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("Failed to generate random token")?;
    Ok(Base64UrlUnpadded::encode_string(&bytes))
}

/// Pull a single cookie value out of the `Cookie` request header.
pub(super) fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let mut parts = pair.trim().splitn(2, '=');
        let cookie_name = parts.next()?;
        let value = parts.next()?;
        (cookie_name == name).then(|| value.to_string())
    })
}

/// Best-effort client address for rate limiting and audit entries.
///
/// Trusts `X-Forwarded-For` (first hop) and falls back to `X-Real-IP`. Both
/// headers come from the reverse proxy in front of this service.
pub(super) fn extract_client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|value| value.to_str().ok())
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn unix_now_is_past_2020() {
        assert!(unix_now() > 1_577_836_800);
    }

    #[test]
    fn cookie_header_sets_attributes() -> Result<()> {
        let value = cookie_header("sess", "token", "Lax", 3600, true)?;
        assert_eq!(
            value.to_str()?,
            "sess=token; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600; Secure"
        );
        Ok(())
    }

    #[test]
    fn cookie_header_without_secure() -> Result<()> {
        let value = cookie_header("sess", "", "Strict", 0, false)?;
        assert_eq!(
            value.to_str()?,
            "sess=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0"
        );
        Ok(())
    }

    #[test]
    fn random_token_is_32_bytes_decoded() -> Result<()> {
        let token = random_token()?;
        let bytes = Base64UrlUnpadded::decode_vec(&token)
            .map_err(|err| anyhow::anyhow!("decode failed: {err}"))?;
        assert_eq!(bytes.len(), 32);
        Ok(())
    }

    #[test]
    fn random_tokens_differ() -> Result<()> {
        assert_ne!(random_token()?, random_token()?);
        Ok(())
    }

    #[test]
    fn extract_cookie_finds_named_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("first=one; qr_admin_session=abc.def; last=two"),
        );
        assert_eq!(
            extract_cookie(&headers, "qr_admin_session"),
            Some("abc.def".to_string())
        );
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn extract_cookie_keeps_equals_in_value() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("token=a=b=c"));
        assert_eq!(extract_cookie(&headers, "token"), Some("a=b=c".to_string()));
    }

    #[test]
    fn extract_cookie_without_header() {
        assert_eq!(extract_cookie(&HeaderMap::new(), "any"), None);
    }

    #[test]
    fn extract_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(
            extract_client_ip(&headers),
            Some("203.0.113.7".to_string())
        );
    }

    #[test]
    fn extract_client_ip_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(
            extract_client_ip(&headers),
            Some("198.51.100.2".to_string())
        );
    }

    #[test]
    fn extract_client_ip_none_when_missing() {
        assert_eq!(extract_client_ip(&HeaderMap::new()), None);
    }
}

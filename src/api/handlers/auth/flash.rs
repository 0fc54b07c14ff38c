//! One-shot flash messages, carried in a signed cookie.
//!
//! Messages survive exactly one redirect: a handler adds them while
//! building a `303`, the next page consumes them and deletes the cookie.
//! The cookie holds a signed JSON array so a client cannot forge or edit
//! what the next page will show.

use crate::api::handlers::auth::{signer, state::AuthConfig, utils};
use anyhow::{Context, Result};
use axum::http::{HeaderMap, HeaderValue, header::SET_COOKIE};
use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

/// How long an unconsumed flash cookie survives.
const FLASH_MAX_AGE_SECONDS: u64 = 300;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, ToSchema)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

/// Queue a single message for the next page view.
///
/// Each call replaces whatever flash cookie a previous call set; callers
/// that need several messages at once use [`add_many`].
pub(super) fn add(
    headers_out: &mut HeaderMap,
    config: &AuthConfig,
    level: FlashLevel,
    text: &str,
) {
    add_many(
        headers_out,
        config,
        &[FlashMessage {
            level,
            text: text.to_string(),
        }],
    );
}

pub(super) fn add_many(
    headers_out: &mut HeaderMap,
    config: &AuthConfig,
    messages: &[FlashMessage],
) {
    match flash_cookie(config, messages) {
        Ok(cookie) => {
            headers_out.append(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to set flash cookie: {err}"),
    }
}

/// Read and delete the flash cookie.
///
/// The deletion goes on `headers_out` whenever the request carried the
/// cookie at all, even if its content no longer decodes; stale or
/// tampered cookies must not outlive the page that saw them.
pub(super) fn consume(
    config: &AuthConfig,
    request_headers: &HeaderMap,
    headers_out: &mut HeaderMap,
) -> Vec<FlashMessage> {
    let Some(raw) = utils::extract_cookie(request_headers, config.flash_cookie_name()) else {
        return Vec::new();
    };
    match clear_flash_cookie(config) {
        Ok(cookie) => {
            headers_out.append(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to clear flash cookie: {err}"),
    }
    decode(config, &raw)
}

/// Decode a flash cookie value, yielding no messages on any failure.
pub(super) fn decode(config: &AuthConfig, value: &str) -> Vec<FlashMessage> {
    let Some((payload_b64, signature_b64)) = value.split_once('.') else {
        debug!("Flash cookie has no signature separator");
        return Vec::new();
    };
    let Ok(raw) = Base64UrlUnpadded::decode_vec(payload_b64) else {
        debug!("Flash cookie payload is not base64");
        return Vec::new();
    };
    let Ok(signature) = Base64UrlUnpadded::decode_vec(signature_b64) else {
        debug!("Flash cookie signature is not base64");
        return Vec::new();
    };
    if !signer::ct_eq(&signer::sign(config.session_secret(), &raw), &signature) {
        debug!("Flash cookie signature mismatch");
        return Vec::new();
    }
    serde_json::from_slice(&raw).unwrap_or_else(|err| {
        debug!("Flash cookie payload is not a message array: {err}");
        Vec::new()
    })
}

fn flash_cookie(config: &AuthConfig, messages: &[FlashMessage]) -> Result<HeaderValue> {
    let raw = serde_json::to_vec(messages).context("Failed to serialize flash messages")?;
    let signature = signer::sign(config.session_secret(), &raw);
    let value = format!(
        "{}.{}",
        Base64UrlUnpadded::encode_string(&raw),
        Base64UrlUnpadded::encode_string(&signature)
    );
    utils::cookie_header(
        config.flash_cookie_name(),
        &value,
        config.cookie_same_site(),
        FLASH_MAX_AGE_SECONDS,
        config.cookie_secure(),
    )
    .context("Failed to build flash cookie header")
}

fn clear_flash_cookie(config: &AuthConfig) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    utils::cookie_header(
        config.flash_cookie_name(),
        "",
        config.cookie_same_site(),
        0,
        config.cookie_secure(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use secrecy::SecretString;

    fn config() -> AuthConfig {
        AuthConfig::new(
            "admin".to_string(),
            SecretString::from("$2b$04$notarealhash"),
            SecretString::from("unit-test-secret"),
        )
        .with_cookie_secure(false)
    }

    fn message(text: &str) -> FlashMessage {
        FlashMessage {
            level: FlashLevel::Error,
            text: text.to_string(),
        }
    }

    /// `Set-Cookie: name=VALUE; ...` -> `VALUE`
    fn set_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
        headers.get_all(SET_COOKIE).iter().find_map(|header| {
            let cookie = header.to_str().ok()?;
            let (cookie_name, rest) = cookie.split_once('=')?;
            (cookie_name == name)
                .then(|| rest.split(';').next().unwrap_or_default().to_string())
        })
    }

    fn request_with_flash(config: &AuthConfig, value: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{}={value}", config.flash_cookie_name()))?,
        );
        Ok(headers)
    }

    #[test]
    fn add_then_consume_round_trips() -> Result<()> {
        let config = config();
        let mut response_headers = HeaderMap::new();
        add(&mut response_headers, &config, FlashLevel::Error, "invalid_credentials");

        let value = set_cookie_value(&response_headers, "qr_flash")
            .context("flash cookie should be set")?;
        let request_headers = request_with_flash(&config, &value)?;

        let mut next_response = HeaderMap::new();
        let messages = consume(&config, &request_headers, &mut next_response);
        assert_eq!(messages, vec![message("invalid_credentials")]);

        // Consuming deletes the cookie.
        let clear = set_cookie_value(&next_response, "qr_flash")
            .context("clearing cookie should be set")?;
        assert!(clear.is_empty());
        Ok(())
    }

    #[test]
    fn add_many_preserves_order() -> Result<()> {
        let config = config();
        let queued = vec![message("first"), message("second")];
        let mut response_headers = HeaderMap::new();
        add_many(&mut response_headers, &config, &queued);

        let value = set_cookie_value(&response_headers, "qr_flash")
            .context("flash cookie should be set")?;
        assert_eq!(decode(&config, &value), queued);
        Ok(())
    }

    #[test]
    fn add_replaces_earlier_messages() -> Result<()> {
        let config = config();
        let mut response_headers = HeaderMap::new();
        add(&mut response_headers, &config, FlashLevel::Info, "older");
        add(&mut response_headers, &config, FlashLevel::Error, "newer");

        // The client honors the last Set-Cookie for a name; decoding it
        // yields only the newest message.
        let last = response_headers
            .get_all(SET_COOKIE)
            .iter()
            .last()
            .and_then(|header| header.to_str().ok())
            .and_then(|cookie| cookie.split_once('='))
            .map(|(_, rest)| rest.split(';').next().unwrap_or_default().to_string())
            .context("flash cookie should be set")?;
        assert_eq!(decode(&config, &last), vec![message("newer")]);
        Ok(())
    }

    #[test]
    fn consume_without_cookie_is_empty_and_silent() {
        let config = config();
        let mut response_headers = HeaderMap::new();
        let messages = consume(&config, &HeaderMap::new(), &mut response_headers);

        assert!(messages.is_empty());
        assert!(response_headers.get(SET_COOKIE).is_none());
    }

    #[test]
    fn consume_deletes_tampered_cookie() -> Result<()> {
        let config = config();
        let request_headers = request_with_flash(&config, "garbage-without-signature")?;

        let mut response_headers = HeaderMap::new();
        let messages = consume(&config, &request_headers, &mut response_headers);
        assert!(messages.is_empty());
        assert!(response_headers.get(SET_COOKIE).is_some());
        Ok(())
    }

    #[test]
    fn decode_rejects_forged_signature() -> Result<()> {
        let config = config();
        let mut response_headers = HeaderMap::new();
        add(&mut response_headers, &config, FlashLevel::Error, "real");
        let value = set_cookie_value(&response_headers, "qr_flash")
            .context("flash cookie should be set")?;

        let other = AuthConfig::new(
            "admin".to_string(),
            SecretString::from("$2b$04$notarealhash"),
            SecretString::from("a-different-secret"),
        );
        assert!(decode(&other, &value).is_empty());
        Ok(())
    }

    #[test]
    fn decode_rejects_non_array_payload() {
        let config = config();
        // Signed correctly, but the payload is a JSON object.
        let raw = br#"{"level":"error","text":"x"}"#;
        let signature = signer::sign(config.session_secret(), raw);
        let value = format!(
            "{}.{}",
            Base64UrlUnpadded::encode_string(raw),
            Base64UrlUnpadded::encode_string(&signature)
        );
        assert!(decode(&config, &value).is_empty());
    }
}

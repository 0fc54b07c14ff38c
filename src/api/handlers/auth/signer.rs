//! HMAC-SHA256 signing over the server-wide session secret.
//!
//! Every signed artifact in this service (session cookie, pre-login token,
//! flash cookie) goes through these two functions, so signature creation
//! and comparison stay in one place.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Sign `message` with the server secret, returning the raw 32-byte tag.
pub(super) fn sign(secret: &SecretString, message: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(message);
    mac.finalize().into_bytes().into()
}

/// Constant-time equality for signature material.
///
/// Slices of different lengths compare unequal without leaking where they
/// diverge.
pub(super) fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

pub(super) fn ct_eq_str(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

//! # Pordisto (Admin Session & Login Hardening)
//!
//! `pordisto` is the authentication core of a support-ticket intake
//! application. It owns the admin login flow end to end: signed session
//! cookies, CSRF protection for both anonymous and authenticated requests,
//! login rate limiting, and one-shot flash messages.
//!
//! ## Cookie Integrity
//!
//! All state lives on the client, signed with HMAC-SHA256 over a single
//! server-side secret. There is no server-side session store; revocation
//! happens by letting cookies expire. Signature checks are constant-time
//! and every decode failure is treated as "no session".
//!
//! ## Login Flow
//!
//! - **Pre-login CSRF:** `GET /admin/login` issues a short-lived signed
//!   token split between a cookie and the form, so even the anonymous
//!   login `POST` proves it came from a page this service rendered.
//! - **Rate limiting:** failed attempts are tracked per client address in
//!   a sliding window. Exceeding the budget locks the address out before
//!   credentials are ever inspected.
//! - **Credentials:** a single admin principal, verified against a bcrypt
//!   hash. Username comparison is case-insensitive; the password check is
//!   the only timing-sensitive step and bcrypt owns it.
//!
//! ## Post-login CSRF
//!
//! The session payload carries a per-session CSRF secret. Mutating
//! requests must echo it in the form body, compared in constant time
//! against the verified cookie.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

//! Admin authentication: sessions, CSRF, rate limiting, flash messages.
//!
//! All client-held state is signed with HMAC-SHA256 over a single server
//! secret and verified in constant time. Decode failures of any kind read
//! as "not present"; nothing in this module ever trusts an unverified
//! cookie byte.
//!
//! Module map:
//!
//! - `signer`: the one signing and comparison primitive.
//! - `session`: signed session cookies with a per-session CSRF secret.
//! - `prelogin`: double-submit CSRF handshake for the anonymous login form.
//! - `csrf`: CSRF enforcement for authenticated mutating requests.
//! - `rate_limit`: sliding-window lockout for failed logins.
//! - `flash`: signed one-shot messages across redirects.
//! - `login`, `logout`, `panel`: the HTTP endpoints tying it together.

mod audit;
mod credentials;
mod csrf;
mod flash;
mod guard;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod panel;
mod prelogin;
mod rate_limit;
mod session;
mod signer;
mod state;
pub(crate) mod types;
mod utils;

pub use audit::{AuditError, AuditEvent, AuditSink, TracingAuditSink};
pub use flash::{FlashLevel, FlashMessage};
pub use rate_limit::LoginRateLimiter;
pub use session::SessionPayload;
pub use state::{AuthConfig, AuthState};

pub(crate) const ADMIN_ROUTE: &str = "/admin";
pub(crate) const LOGIN_ROUTE: &str = "/admin/login";

//! Auth configuration and shared state.

use crate::api::handlers::auth::{
    audit::AuditSink,
    rate_limit::LoginRateLimiter,
};
use secrecy::SecretString;
use std::sync::Arc;

const DEFAULT_SESSION_COOKIE_NAME: &str = "qr_admin_session";
const DEFAULT_FLASH_COOKIE_NAME: &str = "qr_flash";
const DEFAULT_PRELOGIN_COOKIE_NAME: &str = "qr_prelogin_csrf";
const DEFAULT_SESSION_MAX_AGE_MINUTES: u64 = 60;
const DEFAULT_COOKIE_SAME_SITE: &str = "Lax";
const DEFAULT_RATE_LIMIT_WINDOW_SECONDS: u64 = 600;
const DEFAULT_RATE_LIMIT_MAX_ATTEMPTS: usize = 5;
const DEFAULT_RATE_LIMIT_LOCKOUT_SECONDS: u64 = 600;

/// Everything the auth handlers need to know about the deployment.
///
/// Secrets are held as [`SecretString`] so they stay out of debug output
/// and logs.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    admin_user: String,
    admin_pass_hash: SecretString,
    session_secret: SecretString,
    session_cookie_name: String,
    flash_cookie_name: String,
    prelogin_cookie_name: String,
    session_max_age_minutes: u64,
    cookie_secure: bool,
    cookie_same_site: String,
    rate_limit_window_seconds: u64,
    rate_limit_max_attempts: usize,
    rate_limit_lockout_seconds: u64,
}

impl AuthConfig {
    #[must_use]
    pub fn new(
        admin_user: String,
        admin_pass_hash: SecretString,
        session_secret: SecretString,
    ) -> Self {
        Self {
            admin_user,
            admin_pass_hash,
            session_secret,
            session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            flash_cookie_name: DEFAULT_FLASH_COOKIE_NAME.to_string(),
            prelogin_cookie_name: DEFAULT_PRELOGIN_COOKIE_NAME.to_string(),
            session_max_age_minutes: DEFAULT_SESSION_MAX_AGE_MINUTES,
            cookie_secure: true,
            cookie_same_site: DEFAULT_COOKIE_SAME_SITE.to_string(),
            rate_limit_window_seconds: DEFAULT_RATE_LIMIT_WINDOW_SECONDS,
            rate_limit_max_attempts: DEFAULT_RATE_LIMIT_MAX_ATTEMPTS,
            rate_limit_lockout_seconds: DEFAULT_RATE_LIMIT_LOCKOUT_SECONDS,
        }
    }

    #[must_use]
    pub fn with_session_cookie_name(mut self, name: String) -> Self {
        self.session_cookie_name = name;
        self
    }

    #[must_use]
    pub fn with_flash_cookie_name(mut self, name: String) -> Self {
        self.flash_cookie_name = name;
        self
    }

    #[must_use]
    pub fn with_prelogin_cookie_name(mut self, name: String) -> Self {
        self.prelogin_cookie_name = name;
        self
    }

    #[must_use]
    pub fn with_session_max_age_minutes(mut self, minutes: u64) -> Self {
        self.session_max_age_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    #[must_use]
    pub fn with_cookie_same_site(mut self, same_site: String) -> Self {
        self.cookie_same_site = same_site;
        self
    }

    #[must_use]
    pub fn with_rate_limit_window_seconds(mut self, seconds: u64) -> Self {
        self.rate_limit_window_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_rate_limit_max_attempts(mut self, attempts: usize) -> Self {
        self.rate_limit_max_attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_rate_limit_lockout_seconds(mut self, seconds: u64) -> Self {
        self.rate_limit_lockout_seconds = seconds;
        self
    }

    pub(super) fn admin_user(&self) -> &str {
        &self.admin_user
    }

    pub(super) fn admin_pass_hash(&self) -> &SecretString {
        &self.admin_pass_hash
    }

    pub(super) fn session_secret(&self) -> &SecretString {
        &self.session_secret
    }

    pub(super) fn session_cookie_name(&self) -> &str {
        &self.session_cookie_name
    }

    pub(super) fn flash_cookie_name(&self) -> &str {
        &self.flash_cookie_name
    }

    pub(super) fn prelogin_cookie_name(&self) -> &str {
        &self.prelogin_cookie_name
    }

    pub(super) fn session_max_age_seconds(&self) -> u64 {
        self.session_max_age_minutes.saturating_mul(60)
    }

    pub(super) fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    pub(super) fn cookie_same_site(&self) -> &str {
        &self.cookie_same_site
    }

    pub(super) fn rate_limit_window_seconds(&self) -> u64 {
        self.rate_limit_window_seconds
    }

    pub(super) fn rate_limit_max_attempts(&self) -> usize {
        self.rate_limit_max_attempts
    }

    pub(super) fn rate_limit_lockout_seconds(&self) -> u64 {
        self.rate_limit_lockout_seconds
    }
}

/// Shared state handed to every auth handler via an axum [`Extension`].
///
/// [`Extension`]: axum::Extension
pub struct AuthState {
    config: AuthConfig,
    rate_limiter: LoginRateLimiter,
    audit: Arc<dyn AuditSink>,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig, audit: Arc<dyn AuditSink>) -> Self {
        let rate_limiter = LoginRateLimiter::new(
            config.rate_limit_window_seconds(),
            config.rate_limit_max_attempts(),
            config.rate_limit_lockout_seconds(),
        );
        Self {
            config,
            rate_limiter,
            audit,
        }
    }

    pub(super) fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub(super) fn rate_limiter(&self) -> &LoginRateLimiter {
        &self.rate_limiter
    }

    pub(super) fn audit(&self) -> &dyn AuditSink {
        self.audit.as_ref()
    }
}

//! Command-line argument dispatch and server initialization.
//!
//! This module parses validated CLI arguments and maps them to the appropriate
//! action, such as starting the API server with its full configuration state.

use crate::cli::actions::{server::Args, Action};
use anyhow::{bail, Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or empty.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let admin_user = matches
        .get_one::<String>("admin-user")
        .cloned()
        .context("missing required argument: --admin-user")?;
    if admin_user.trim().is_empty() {
        bail!("--admin-user must not be empty");
    }

    let admin_pass_hash = matches
        .get_one::<String>("admin-pass-hash")
        .cloned()
        .context("missing required argument: --admin-pass-hash")?;
    if admin_pass_hash.trim().is_empty() {
        bail!("--admin-pass-hash must not be empty");
    }

    let session_secret = matches
        .get_one::<String>("session-secret")
        .cloned()
        .context("missing required argument: --session-secret")?;
    if session_secret.trim().is_empty() {
        bail!("--session-secret must not be empty");
    }

    let session_max_age_minutes = matches
        .get_one::<u64>("session-max-age-minutes")
        .copied()
        .unwrap_or(60);

    let session_cookie_name = matches
        .get_one::<String>("session-cookie-name")
        .cloned()
        .unwrap_or_else(|| "qr_admin_session".to_string());
    let flash_cookie_name = matches
        .get_one::<String>("flash-cookie-name")
        .cloned()
        .unwrap_or_else(|| "qr_flash".to_string());
    let prelogin_cookie_name = matches
        .get_one::<String>("prelogin-cookie-name")
        .cloned()
        .unwrap_or_else(|| "qr_prelogin_csrf".to_string());

    let cookie_secure = matches.get_one::<bool>("cookie-secure").copied().unwrap_or(true);
    let cookie_same_site = matches
        .get_one::<String>("cookie-samesite")
        .cloned()
        .unwrap_or_else(|| "Lax".to_string());

    let rate_limit_window_seconds = matches
        .get_one::<u64>("rate-limit-window-seconds")
        .copied()
        .unwrap_or(600);
    let rate_limit_max_attempts = matches
        .get_one::<usize>("rate-limit-max-attempts")
        .copied()
        .unwrap_or(5);
    let rate_limit_lockout_seconds = matches
        .get_one::<u64>("rate-limit-lockout-seconds")
        .copied()
        .unwrap_or(600);

    Ok(Action::Server(Args {
        port,
        admin_user,
        admin_pass_hash: SecretString::from(admin_pass_hash),
        session_secret: SecretString::from(session_secret),
        session_max_age_minutes,
        session_cookie_name,
        flash_cookie_name,
        prelogin_cookie_name,
        cookie_secure,
        cookie_same_site,
        rate_limit_window_seconds,
        rate_limit_max_attempts,
        rate_limit_lockout_seconds,
    }))
}

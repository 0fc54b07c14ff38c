use crate::api;
use anyhow::Result;
use secrecy::SecretString;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub admin_user: String,
    pub admin_pass_hash: SecretString,
    pub session_secret: SecretString,
    pub session_max_age_minutes: u64,
    pub session_cookie_name: String,
    pub flash_cookie_name: String,
    pub prelogin_cookie_name: String,
    pub cookie_secure: bool,
    pub cookie_same_site: String,
    pub rate_limit_window_seconds: u64,
    pub rate_limit_max_attempts: usize,
    pub rate_limit_lockout_seconds: u64,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let auth_config = api::handlers::auth::AuthConfig::new(
        args.admin_user,
        args.admin_pass_hash,
        args.session_secret,
    )
    .with_session_max_age_minutes(args.session_max_age_minutes)
    .with_session_cookie_name(args.session_cookie_name)
    .with_flash_cookie_name(args.flash_cookie_name)
    .with_prelogin_cookie_name(args.prelogin_cookie_name)
    .with_cookie_secure(args.cookie_secure)
    .with_cookie_same_site(args.cookie_same_site)
    .with_rate_limit_window_seconds(args.rate_limit_window_seconds)
    .with_rate_limit_max_attempts(args.rate_limit_max_attempts)
    .with_rate_limit_lockout_seconds(args.rate_limit_lockout_seconds);

    api::new(args.port, auth_config).await
}

// Secrets (pass hash, signing key) are never part of the startup table.
fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("admin_user", args.admin_user.clone()),
        ("session_cookie", args.session_cookie_name.clone()),
        ("flash_cookie", args.flash_cookie_name.clone()),
        ("prelogin_cookie", args.prelogin_cookie_name.clone()),
        (
            "session_max_age",
            format!("{}m", args.session_max_age_minutes),
        ),
        ("cookie_samesite", args.cookie_same_site.clone()),
        ("cookie_secure", args.cookie_secure.to_string()),
        (
            "rate_limit",
            format!(
                "{} attempts / {}s, lockout {}s",
                args.rate_limit_max_attempts,
                args.rate_limit_window_seconds,
                args.rate_limit_lockout_seconds
            ),
        ),
    ];

    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = String::from("Startup configuration:");
    for (key, value) in &entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

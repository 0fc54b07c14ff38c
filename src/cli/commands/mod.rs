pub mod auth;
pub mod cookies;
pub mod logging;
pub mod rate_limit;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("pordisto")
        .about("Admin session and login hardening service")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("PORDISTO_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    let command = auth::with_args(command);
    let command = cookies::with_args(command);
    let command = rate_limit::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "pordisto");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Admin session and login hardening service".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_check_port_and_credentials() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "pordisto",
            "--port",
            "8080",
            "--admin-user",
            "admin",
            "--admin-pass-hash",
            "$2b$12$abcdefghijklmnopqrstuv",
            "--session-secret",
            "sekreta-sesio",
        ]);

        assert_eq!(matches.get_one::<u16>("port").map(|s| *s), Some(8080));
        assert_eq!(
            matches
                .get_one::<String>("admin-user")
                .map(|s| s.to_string()),
            Some("admin".to_string())
        );
        assert_eq!(
            matches
                .get_one::<String>("admin-pass-hash")
                .map(|s| s.to_string()),
            Some("$2b$12$abcdefghijklmnopqrstuv".to_string())
        );
        assert_eq!(
            matches
                .get_one::<String>("session-secret")
                .map(|s| s.to_string()),
            Some("sekreta-sesio".to_string())
        );
        assert_eq!(
            matches.get_one::<u64>("session-max-age-minutes").copied(),
            Some(60)
        );
        assert_eq!(
            matches
                .get_one::<String>("session-cookie-name")
                .map(|s| s.to_string()),
            Some("qr_admin_session".to_string())
        );
        assert_eq!(
            matches.get_one::<bool>("cookie-secure").copied(),
            Some(true)
        );
        assert_eq!(
            matches
                .get_one::<String>("cookie-samesite")
                .map(|s| s.to_string()),
            Some("Lax".to_string())
        );
        assert_eq!(
            matches.get_one::<u64>("rate-limit-window-seconds").copied(),
            Some(600)
        );
        assert_eq!(
            matches.get_one::<usize>("rate-limit-max-attempts").copied(),
            Some(5)
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("PORDISTO_PORT", Some("443")),
                ("PORDISTO_ADMIN_USER", Some("admin")),
                (
                    "PORDISTO_ADMIN_PASS_HASH",
                    Some("$2b$12$abcdefghijklmnopqrstuv"),
                ),
                ("PORDISTO_SESSION_SECRET", Some("sekreta-sesio")),
                ("PORDISTO_SESSION_MAX_AGE_MINUTES", Some("30")),
                ("PORDISTO_COOKIE_SECURE", Some("false")),
                ("PORDISTO_COOKIE_SAMESITE", Some("strict")),
                ("PORDISTO_RATE_LIMIT_MAX_ATTEMPTS", Some("3")),
                ("PORDISTO_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["pordisto"]);
                assert_eq!(matches.get_one::<u16>("port").map(|s| *s), Some(443));
                assert_eq!(
                    matches
                        .get_one::<String>("admin-user")
                        .map(|s| s.to_string()),
                    Some("admin".to_string())
                );
                assert_eq!(
                    matches.get_one::<u64>("session-max-age-minutes").copied(),
                    Some(30)
                );
                assert_eq!(
                    matches.get_one::<bool>("cookie-secure").copied(),
                    Some(false)
                );
                assert_eq!(
                    matches
                        .get_one::<String>("cookie-samesite")
                        .map(|s| s.to_string()),
                    Some("Strict".to_string())
                );
                assert_eq!(
                    matches.get_one::<usize>("rate-limit-max-attempts").copied(),
                    Some(3)
                );
                assert_eq!(matches.get_one::<u8>("verbosity").map(|s| *s), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("PORDISTO_LOG_LEVEL", Some(level)),
                    ("PORDISTO_ADMIN_USER", Some("admin")),
                    (
                        "PORDISTO_ADMIN_PASS_HASH",
                        Some("$2b$12$abcdefghijklmnopqrstuv"),
                    ),
                    ("PORDISTO_SESSION_SECRET", Some("sekreta-sesio")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["pordisto"]);
                    assert_eq!(
                        matches.get_one::<u8>("verbosity").map(|s| *s),
                        Some(index as u8)
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("PORDISTO_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "pordisto".to_string(),
                    "--admin-user".to_string(),
                    "admin".to_string(),
                    "--admin-pass-hash".to_string(),
                    "$2b$12$abcdefghijklmnopqrstuv".to_string(),
                    "--session-secret".to_string(),
                    "sekreta-sesio".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();

                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").map(|s| *s),
                    Some(index as u8)
                );
            });
        }
    }

    #[test]
    fn test_missing_required_args() {
        temp_env::with_vars(
            [
                ("PORDISTO_ADMIN_USER", None::<&str>),
                ("PORDISTO_ADMIN_PASS_HASH", None::<&str>),
                ("PORDISTO_SESSION_SECRET", None::<&str>),
            ],
            || {
                let command = new();
                let result = command.try_get_matches_from(vec!["pordisto"]);
                assert!(result.is_err());
                if let Err(err) = result {
                    assert_eq!(
                        err.kind(),
                        clap::error::ErrorKind::MissingRequiredArgument
                    );
                }
            },
        );
    }

    #[test]
    fn test_invalid_samesite_rejected() {
        let command = new();
        let result = command.try_get_matches_from(vec![
            "pordisto",
            "--admin-user",
            "admin",
            "--admin-pass-hash",
            "$2b$12$abcdefghijklmnopqrstuv",
            "--session-secret",
            "sekreta-sesio",
            "--cookie-samesite",
            "sideways",
        ]);
        assert!(result.is_err());
        if let Err(err) = result {
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn test_cookie_secure_boolish() {
        for (raw, expected) in [("yes", true), ("no", false), ("1", true), ("0", false)] {
            let command = new();
            let matches = command.get_matches_from(vec![
                "pordisto",
                "--admin-user",
                "admin",
                "--admin-pass-hash",
                "$2b$12$abcdefghijklmnopqrstuv",
                "--session-secret",
                "sekreta-sesio",
                "--cookie-secure",
                raw,
            ]);
            assert_eq!(
                matches.get_one::<bool>("cookie-secure").copied(),
                Some(expected)
            );
        }
    }
}

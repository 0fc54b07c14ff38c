use clap::{
    builder::{BoolishValueParser, ValueParser},
    Arg, Command,
};

/// Normalize the SameSite attribute to its canonical capitalization.
#[must_use]
pub fn validator_same_site() -> ValueParser {
    ValueParser::from(move |value: &str| -> std::result::Result<String, String> {
        match value.to_lowercase().as_str() {
            "strict" => Ok("Strict".to_string()),
            "lax" => Ok("Lax".to_string()),
            "none" => Ok("None".to_string()),
            _ => Err("invalid SameSite value, expected strict, lax or none".to_string()),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("session-cookie-name")
                .long("session-cookie-name")
                .help("Name of the signed session cookie")
                .env("PORDISTO_SESSION_COOKIE_NAME")
                .default_value("qr_admin_session"),
        )
        .arg(
            Arg::new("flash-cookie-name")
                .long("flash-cookie-name")
                .help("Name of the one-shot flash message cookie")
                .env("PORDISTO_FLASH_COOKIE_NAME")
                .default_value("qr_flash"),
        )
        .arg(
            Arg::new("prelogin-cookie-name")
                .long("prelogin-cookie-name")
                .help("Name of the pre-login CSRF cookie")
                .env("PORDISTO_PRELOGIN_COOKIE_NAME")
                .default_value("qr_prelogin_csrf"),
        )
        .arg(
            Arg::new("cookie-secure")
                .long("cookie-secure")
                .help("Mark cookies Secure, disable only for plain HTTP development")
                .env("PORDISTO_COOKIE_SECURE")
                .default_value("true")
                .value_parser(BoolishValueParser::new()),
        )
        .arg(
            Arg::new("cookie-samesite")
                .long("cookie-samesite")
                .help("SameSite attribute for all cookies: strict, lax or none")
                .env("PORDISTO_COOKIE_SAMESITE")
                .default_value("Lax")
                .value_parser(validator_same_site()),
        )
}

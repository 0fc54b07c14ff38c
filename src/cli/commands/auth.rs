use clap::{Arg, Command};

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("admin-user")
                .long("admin-user")
                .help("Admin username accepted at login")
                .env("PORDISTO_ADMIN_USER")
                .required(true),
        )
        .arg(
            Arg::new("admin-pass-hash")
                .long("admin-pass-hash")
                .help("Bcrypt hash of the admin password")
                .env("PORDISTO_ADMIN_PASS_HASH")
                .required(true),
        )
        .arg(
            Arg::new("session-secret")
                .long("session-secret")
                .help("Secret key used to sign session, CSRF and flash cookies")
                .env("PORDISTO_SESSION_SECRET")
                .required(true),
        )
        .arg(
            Arg::new("session-max-age-minutes")
                .long("session-max-age-minutes")
                .help("Session cookie lifetime in minutes")
                .env("PORDISTO_SESSION_MAX_AGE_MINUTES")
                .default_value("60")
                .value_parser(clap::value_parser!(u64)),
        )
}

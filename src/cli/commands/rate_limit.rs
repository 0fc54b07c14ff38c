use clap::{Arg, Command};

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("rate-limit-window-seconds")
                .long("rate-limit-window-seconds")
                .help("Sliding window for counting failed logins, in seconds")
                .env("PORDISTO_RATE_LIMIT_WINDOW_SECONDS")
                .default_value("600")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("rate-limit-max-attempts")
                .long("rate-limit-max-attempts")
                .help("Failed logins allowed within the window before lockout")
                .env("PORDISTO_RATE_LIMIT_MAX_ATTEMPTS")
                .default_value("5")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("rate-limit-lockout-seconds")
                .long("rate-limit-lockout-seconds")
                .help("Lockout duration once the limit is hit, in seconds")
                .env("PORDISTO_RATE_LIMIT_LOCKOUT_SECONDS")
                .default_value("600")
                .value_parser(clap::value_parser!(u64)),
        )
}

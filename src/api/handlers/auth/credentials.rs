//! Admin credential verification.
//!
//! There is exactly one admin principal, configured at startup as a
//! username plus a bcrypt hash. No password material is ever held in
//! plain text.

use crate::api::handlers::auth::state::AuthConfig;
use secrecy::ExposeSecret;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CredentialOutcome {
    Accepted,
    UnknownUser,
    BadPassword,
}

/// Check a submitted username and password against the configured admin.
///
/// Usernames compare case-insensitively with surrounding whitespace
/// ignored. A hash that bcrypt refuses to parse counts as a failed
/// password, not an error the client gets to see.
pub(super) fn verify_credentials(
    config: &AuthConfig,
    username: &str,
    password: &str,
) -> CredentialOutcome {
    if username.trim().to_lowercase() != config.admin_user().trim().to_lowercase() {
        return CredentialOutcome::UnknownUser;
    }
    match bcrypt::verify(password, config.admin_pass_hash().expose_secret()) {
        Ok(true) => CredentialOutcome::Accepted,
        Ok(false) => CredentialOutcome::BadPassword,
        Err(err) => {
            warn!("bcrypt verification failed: {err}");
            CredentialOutcome::BadPassword
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use secrecy::SecretString;

    // Minimum cost keeps the tests fast.
    fn config_with_password(password: &str) -> Result<AuthConfig> {
        let hash = bcrypt::hash(password, 4)?;
        Ok(AuthConfig::new(
            "admin".to_string(),
            SecretString::from(hash),
            SecretString::from("unit-test-secret"),
        ))
    }

    #[test]
    fn accepts_correct_credentials() -> Result<()> {
        let config = config_with_password("hunter2")?;
        assert_eq!(
            verify_credentials(&config, "admin", "hunter2"),
            CredentialOutcome::Accepted
        );
        Ok(())
    }

    #[test]
    fn username_is_case_and_whitespace_insensitive() -> Result<()> {
        let config = config_with_password("hunter2")?;
        assert_eq!(
            verify_credentials(&config, "  ADMIN ", "hunter2"),
            CredentialOutcome::Accepted
        );
        Ok(())
    }

    #[test]
    fn rejects_unknown_user() -> Result<()> {
        let config = config_with_password("hunter2")?;
        assert_eq!(
            verify_credentials(&config, "root", "hunter2"),
            CredentialOutcome::UnknownUser
        );
        Ok(())
    }

    #[test]
    fn rejects_wrong_password() -> Result<()> {
        let config = config_with_password("hunter2")?;
        assert_eq!(
            verify_credentials(&config, "admin", "hunter3"),
            CredentialOutcome::BadPassword
        );
        Ok(())
    }

    #[test]
    fn unparseable_hash_reads_as_bad_password() {
        let config = AuthConfig::new(
            "admin".to_string(),
            SecretString::from("not-a-bcrypt-hash"),
            SecretString::from("unit-test-secret"),
        );
        assert_eq!(
            verify_credentials(&config, "admin", "hunter2"),
            CredentialOutcome::BadPassword
        );
    }
}

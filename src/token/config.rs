use chrono::Duration;
use std::fmt;

use crate::secret::SecretString;
use crate::AuthError;

/// Minimum required length for the signing secret in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Configuration for session token generation and validation.
#[derive(Clone)]
pub struct TokenConfig {
    /// Secret key used for signing tokens (HS256).
    pub(crate) secret: SecretString,
    /// Token expiry duration.
    pub(crate) expiry: Duration,
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("expiry", &self.expiry)
            .finish()
    }
}

impl TokenConfig {
    /// Creates a new token configuration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if the secret is shorter than
    /// [`MIN_SECRET_LENGTH`] bytes.
    pub fn new(secret: SecretString, expiry: Duration) -> Result<Self, AuthError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(AuthError::Configuration(format!(
                "signing secret must be at least {MIN_SECRET_LENGTH} bytes, got {}",
                secret.len()
            )));
        }

        Ok(Self { secret, expiry })
    }

    /// Returns the configured token expiry duration.
    pub fn expiry(&self) -> Duration {
        self.expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_too_short() {
        let result = TokenConfig::new(SecretString::new("short"), Duration::hours(1));
        assert!(
            matches!(result, Err(AuthError::Configuration(ref msg)) if msg.contains("32 bytes"))
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = TokenConfig::new(
            SecretString::new("test-secret-32-bytes-long-key-01"),
            Duration::hours(1),
        )
        .unwrap();
        let printed = format!("{config:?}");
        assert!(printed.contains("[REDACTED]"));
        assert!(!printed.contains("test-secret"));
    }
}

use serde::{Deserialize, Serialize};

/// Claims embedded in a session token.
///
/// Only the user's display name, email, and the expiry timestamp are
/// retained; no other PII crosses into the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Display name of the authenticated user.
    pub name: String,
    /// Email of the authenticated user.
    pub email: String,
    /// Expiration time (Unix timestamp, seconds).
    pub exp: i64,
}

impl SessionClaims {
    /// Returns true if the expiry lies strictly in the future.
    pub fn expires_later_than_now(&self) -> bool {
        self.exp > chrono::Utc::now().timestamp()
    }
}

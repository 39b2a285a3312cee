pub mod actions;
pub mod config;
pub mod identity;
pub mod secret;
pub mod session;
pub mod token;
pub mod web;

pub use config::AppConfig;
pub use identity::IdentityRecord;
pub use secret::SecretString;
pub use session::{CookieSessionStore, SessionStore};
pub use token::{SessionClaims, TokenCodec, TokenConfig};

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    MissingAssertion,
    AssertionInvalid(String),
    TokenInvalid,
    SessionMissing,
    SessionStore(String),
    Configuration(String),
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingAssertion => write!(f, "No token supplied by the identity provider"),
            AuthError::AssertionInvalid(msg) => write!(f, "Invalid provider assertion: {}", msg),
            AuthError::TokenInvalid => write!(f, "Invalid session token"),
            AuthError::SessionMissing => write!(f, "No session token present"),
            AuthError::SessionStore(msg) => write!(f, "Session store error: {}", msg),
            AuthError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

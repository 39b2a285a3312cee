//! Cookie-backed session storage.
//!
//! One opaque blob per browser, correlated by a signed cookie. The blob
//! holds exactly one key-value pair in practice: the configured token
//! field name mapped to the session token. Only this module touches the
//! cookie transport; everything else goes through the [`SessionStore`]
//! trait.

mod cookie;
mod store;

use std::collections::HashMap;

pub use cookie::{sign_value, verify_signed_value};
pub use store::{CookieSessionStore, SessionStore};

use serde::{Deserialize, Serialize};

/// The opaque per-browser session payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionBlob {
    values: HashMap<String, String>,
}

impl SessionBlob {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

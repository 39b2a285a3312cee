//! Session store abstraction and the cookie-backed implementation.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Duration;

use super::cookie::{sign_value, verify_signed_value};
use super::SessionBlob;
use crate::config::SessionSettings;
use crate::secret::SecretString;
use crate::AuthError;

/// Abstract key-value session store, keyed per browser by the request's
/// cookies.
///
/// Implementations transform a [`CookieJar`]: reads come from the
/// request's cookies, writes and deletions surface as `Set-Cookie`
/// headers when the returned jar is part of the response. A server-side
/// backend would keep only a session id in the jar and do its I/O
/// elsewhere; callers cannot tell the difference.
pub trait SessionStore: Send + Sync {
    /// Reads a single value from the session, if one exists.
    fn get(&self, jar: &CookieJar, key: &str) -> Option<String>;

    /// Writes `key` into the session and persists it with the given
    /// max-age.
    fn set(
        &self,
        jar: CookieJar,
        key: &str,
        value: &str,
        max_age: Duration,
    ) -> Result<CookieJar, AuthError>;

    /// Instructs the browser to expire the session immediately.
    fn delete(&self, jar: CookieJar) -> Result<CookieJar, AuthError>;
}

/// Cookie-backed session store.
///
/// The whole session blob lives in one cookie: JSON, base64url-encoded,
/// with an HMAC-SHA256 signature appended. There is no server-side
/// state.
#[derive(Debug, Clone)]
pub struct CookieSessionStore {
    cookie_name: String,
    secret: SecretString,
}

impl CookieSessionStore {
    pub fn new(cookie_name: impl Into<String>, secret: SecretString) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            secret,
        }
    }

    /// Builds a store from the application's session settings.
    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self::new(settings.cookie_name.clone(), settings.signing_secret.clone())
    }

    /// Decodes the blob out of the request cookies, rejecting anything
    /// unsigned or undecodable.
    fn read_blob(&self, jar: &CookieJar) -> Option<SessionBlob> {
        let cookie = jar.get(&self.cookie_name)?;
        let payload = verify_signed_value(cookie.value(), &self.secret)?;

        let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(blob) => Some(blob),
            Err(err) => {
                log::warn!(
                    target: "gatehouse::session",
                    "msg=\"session blob undecodable\" error=\"{err}\""
                );
                None
            }
        }
    }

    fn encode_blob(&self, blob: &SessionBlob) -> Result<String, AuthError> {
        let bytes = serde_json::to_vec(blob)
            .map_err(|err| AuthError::SessionStore(format!("failed to encode blob: {err}")))?;
        Ok(sign_value(&URL_SAFE_NO_PAD.encode(bytes), &self.secret))
    }
}

impl SessionStore for CookieSessionStore {
    fn get(&self, jar: &CookieJar, key: &str) -> Option<String> {
        self.read_blob(jar)
            .and_then(|blob| blob.get(key).map(ToOwned::to_owned))
    }

    fn set(
        &self,
        jar: CookieJar,
        key: &str,
        value: &str,
        max_age: Duration,
    ) -> Result<CookieJar, AuthError> {
        let mut blob = self.read_blob(&jar).unwrap_or_default();
        blob.insert(key, value);

        let mut cookie = Cookie::new(self.cookie_name.clone(), self.encode_blob(&blob)?);
        cookie.set_path("/");
        cookie.set_http_only(true);
        // Lax: the login round-trip arrives via a cross-site redirect.
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(time::Duration::seconds(max_age.num_seconds()));

        Ok(jar.add(cookie))
    }

    fn delete(&self, jar: CookieJar) -> Result<CookieJar, AuthError> {
        let mut cookie = Cookie::new(self.cookie_name.clone(), "");
        cookie.set_path("/");
        Ok(jar.remove(cookie))
    }
}

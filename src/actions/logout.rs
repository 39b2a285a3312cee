use axum_extra::extract::cookie::CookieJar;

use crate::session::SessionStore;
use crate::AuthError;

/// Invalidates the current session, whether or not one exists.
pub struct LogoutAction<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> LogoutAction<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Instructs the store to expire the session immediately.
    ///
    /// Best-effort: a persistence failure is reported in the outcome but
    /// the caller still redirects the browser to the login page.
    #[tracing::instrument(name = "logout", skip_all)]
    pub fn execute(&self, jar: CookieJar) -> (CookieJar, Result<(), AuthError>) {
        let original = jar.clone();

        match self.store.delete(jar) {
            Ok(jar) => {
                log::info!(target: "gatehouse::auth", "msg=\"logout success\"");
                (jar, Ok(()))
            }
            Err(err) => (original, Err(err)),
        }
    }
}

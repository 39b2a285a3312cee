use axum_extra::extract::cookie::CookieJar;

use super::IssueSessionAction;
use crate::identity::decode_assertion;
use crate::session::SessionStore;
use crate::token::TokenCodec;
use crate::AuthError;

/// Exchanges a provider assertion for a local session.
///
/// Any pre-existing session is cleared before the exchange runs, so a
/// failed exchange never leaves stale credentials behind. On success the
/// decoded identity is handed to [`IssueSessionAction`].
pub struct ExchangeAssertionAction<S: SessionStore + Clone> {
    store: S,
    codec: TokenCodec,
    token_field: String,
}

impl<S: SessionStore + Clone> ExchangeAssertionAction<S> {
    pub fn new(store: S, codec: TokenCodec, token_field: impl Into<String>) -> Self {
        Self {
            store,
            codec,
            token_field: token_field.into(),
        }
    }

    /// Runs one exchange.
    ///
    /// The returned jar carries the session mutation in every case: the
    /// removal of the previous session, plus the new session on success.
    /// The outcome distinguishes the failure for logging; callers
    /// collapse all failures into a single unauthorized response.
    #[tracing::instrument(name = "exchange_assertion", skip_all)]
    pub fn execute(
        &self,
        jar: CookieJar,
        assertion: Option<&str>,
    ) -> (CookieJar, Result<(), AuthError>) {
        // Stale-session hygiene before anything else.
        let original = jar.clone();
        let jar = match self.store.delete(jar) {
            Ok(jar) => jar,
            Err(err) => return (original, Err(err)),
        };

        let assertion = match assertion.map(str::trim) {
            Some(a) if !a.is_empty() => a,
            _ => return (jar, Err(AuthError::MissingAssertion)),
        };

        let identity = match decode_assertion(assertion) {
            Ok(identity) => identity,
            Err(err) => return (jar, Err(err)),
        };

        let issue = IssueSessionAction::new(
            self.store.clone(),
            self.codec.clone(),
            self.token_field.clone(),
        );

        match issue.execute(jar.clone(), &identity) {
            Ok(jar) => (jar, Ok(())),
            Err(err) => (jar, Err(err)),
        }
    }
}

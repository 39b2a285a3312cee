use axum_extra::extract::cookie::CookieJar;

use crate::identity::IdentityRecord;
use crate::session::SessionStore;
use crate::token::TokenCodec;
use crate::AuthError;

/// Mints a signed session token for an identity and commits it to the
/// session store.
pub struct IssueSessionAction<S: SessionStore> {
    store: S,
    codec: TokenCodec,
    token_field: String,
}

impl<S: SessionStore> IssueSessionAction<S> {
    pub fn new(store: S, codec: TokenCodec, token_field: impl Into<String>) -> Self {
        Self {
            store,
            codec,
            token_field: token_field.into(),
        }
    }

    /// Issues the token and persists it under the configured field.
    ///
    /// The blob's max-age matches the token expiry. Persist failures are
    /// returned as-is; the caller decides recovery, there is no retry.
    #[tracing::instrument(name = "issue_session", skip_all)]
    pub fn execute(
        &self,
        jar: CookieJar,
        identity: &IdentityRecord,
    ) -> Result<CookieJar, AuthError> {
        let issued = self.codec.issue(identity)?;

        let jar = self
            .store
            .set(jar, &self.token_field, &issued.token, self.codec.expiry())?;

        log::info!(
            target: "gatehouse::auth",
            "msg=\"session issued\" email=\"{}\" expires_at=\"{}\"",
            identity.email,
            issued.expires_at
        );

        Ok(jar)
    }
}

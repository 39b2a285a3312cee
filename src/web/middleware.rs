//! The auth gate: a request interceptor for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use super::routes::AppState;
use crate::session::SessionStore;
use crate::token::{SessionClaims, TokenCodec};
use crate::AuthError;

/// The gate predicate: does this jar carry a currently-valid session
/// token?
///
/// Pure and idempotent; evaluating it never mutates session state. An
/// absent session or missing token field is an unauthenticated outcome,
/// not a failure of the gate itself.
pub fn evaluate_session<S: SessionStore>(
    store: &S,
    codec: &TokenCodec,
    token_field: &str,
    jar: &CookieJar,
) -> Result<SessionClaims, AuthError> {
    let token = store
        .get(jar, token_field)
        .ok_or(AuthError::SessionMissing)?;
    codec.verify(&token)
}

/// Interceptor wrapping protected handlers.
///
/// On success the request is forwarded unchanged; handlers that need
/// identity re-derive it themselves. On any failure the caller is
/// redirected to the login page instead of receiving an error body.
pub async fn require_session<S>(
    State(state): State<AppState<S>>,
    request: Request,
    next: Next,
) -> Response
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let jar = CookieJar::from_headers(request.headers());

    match evaluate_session(
        &state.sessions,
        &state.codec,
        &state.config.session.token_field,
        &jar,
    ) {
        Ok(_) => next.run(request).await,
        Err(err) => {
            log::debug!(
                target: "gatehouse::auth",
                "msg=\"request denied, redirecting to login\" path=\"{}\" reason=\"{err}\"",
                request.uri().path()
            );
            Redirect::temporary("/login").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderMap;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header};

    use super::*;
    use crate::identity::IdentityRecord;
    use crate::secret::SecretString;
    use crate::session::CookieSessionStore;
    use crate::token::TokenConfig;

    const SECRET: &str = "test-secret-32-bytes-long-key-00";
    const TOKEN_FIELD: &str = "session_token";

    fn codec() -> TokenCodec {
        TokenCodec::new(
            TokenConfig::new(SecretString::new(SECRET), Duration::hours(2)).unwrap(),
        )
    }

    fn store() -> CookieSessionStore {
        CookieSessionStore::new("gatehouse_session", SecretString::new(SECRET))
    }

    fn empty_jar() -> CookieJar {
        CookieJar::from_headers(&HeaderMap::new())
    }

    fn identity() -> IdentityRecord {
        IdentityRecord {
            name: "Ada Lovelace".to_owned(),
            given_name: "Ada".to_owned(),
            family_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
        }
    }

    #[test]
    fn test_allows_valid_session() {
        let codec = codec();
        let store = store();
        let issued = codec.issue(&identity()).unwrap();
        let jar = store
            .set(empty_jar(), TOKEN_FIELD, &issued.token, Duration::hours(2))
            .unwrap();

        let claims = evaluate_session(&store, &codec, TOKEN_FIELD, &jar).unwrap();
        assert_eq!(claims.email, "ada@example.com");
    }

    #[test]
    fn test_denies_absent_session() {
        let result = evaluate_session(&store(), &codec(), TOKEN_FIELD, &empty_jar());
        assert_eq!(result, Err(AuthError::SessionMissing));
    }

    #[test]
    fn test_denies_session_without_token_field() {
        let store = store();
        let jar = store
            .set(empty_jar(), "unrelated", "value", Duration::hours(2))
            .unwrap();

        let result = evaluate_session(&store, &codec(), TOKEN_FIELD, &jar);
        assert_eq!(result, Err(AuthError::SessionMissing));
    }

    #[test]
    fn test_denies_garbage_token() {
        let store = store();
        let jar = store
            .set(empty_jar(), TOKEN_FIELD, "not-a-token", Duration::hours(2))
            .unwrap();

        let result = evaluate_session(&store, &codec(), TOKEN_FIELD, &jar);
        assert_eq!(result, Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_denies_expired_token() {
        let store = store();
        let claims = crate::token::SessionClaims {
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            exp: Utc::now().timestamp() - 60,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        let jar = store
            .set(empty_jar(), TOKEN_FIELD, &token, Duration::hours(2))
            .unwrap();

        let result = evaluate_session(&store, &codec(), TOKEN_FIELD, &jar);
        assert_eq!(result, Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_denies_after_logout() {
        let codec = codec();
        let store = store();
        let issued = codec.issue(&identity()).unwrap();
        let jar = store
            .set(empty_jar(), TOKEN_FIELD, &issued.token, Duration::hours(2))
            .unwrap();
        assert!(evaluate_session(&store, &codec, TOKEN_FIELD, &jar).is_ok());

        let jar = store.delete(jar).unwrap();
        let result = evaluate_session(&store, &codec, TOKEN_FIELD, &jar);
        assert_eq!(result, Err(AuthError::SessionMissing));
    }

    #[test]
    fn test_evaluation_does_not_mutate_session() {
        let codec = codec();
        let store = store();
        let issued = codec.issue(&identity()).unwrap();
        let jar = store
            .set(empty_jar(), TOKEN_FIELD, &issued.token, Duration::hours(2))
            .unwrap();

        let before = store.get(&jar, TOKEN_FIELD);
        let _ = evaluate_session(&store, &codec, TOKEN_FIELD, &jar);
        let _ = evaluate_session(&store, &codec, TOKEN_FIELD, &jar);
        assert_eq!(store.get(&jar, TOKEN_FIELD), before);
    }
}

//! HTTP handlers for the login flow and the gated pages.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::error::{AppError, ErrorResponse};
use super::middleware::evaluate_session;
use super::pages;
use super::routes::AppState;
use crate::actions::{ExchangeAssertionAction, LogoutAction};
use crate::session::SessionStore;

/// The assertion the provider posts back after a successful login.
#[derive(Debug, Deserialize)]
pub struct AssertionForm {
    #[serde(default)]
    access_token: Option<String>,
}

/// Renders the login page.
///
/// GET /login — responds 401 even on a successful render.
pub async fn login() -> impl IntoResponse {
    (StatusCode::UNAUTHORIZED, Html(pages::LOGIN))
}

/// Sends the browser to the provider for authentication.
///
/// GET /auth/azure
pub async fn azure_login<S>(State(state): State<AppState<S>>) -> Redirect
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    Redirect::temporary(&state.config.azure.authorize_url())
}

/// Renders the intermediate callback page that forwards the assertion
/// from the URL fragment to the token endpoint.
///
/// GET on the configured callback path.
pub async fn azure_callback() -> Html<&'static str> {
    Html(pages::CALLBACK)
}

/// Consumes the provider assertion and establishes a session.
///
/// GET /auth/azure/token — success redirects home; every failure
/// collapses into a 401 with the failure's message.
pub async fn azure_token<S>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    Form(form): Form<AssertionForm>,
) -> Response
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let action = ExchangeAssertionAction::new(
        state.sessions.clone(),
        state.codec.clone(),
        state.config.session.token_field.clone(),
    );

    let (jar, outcome) = action.execute(jar, form.access_token.as_deref());

    match outcome {
        Ok(()) => (jar, Redirect::temporary("/")).into_response(),
        Err(err) => {
            log::warn!(
                target: "gatehouse::web",
                "msg=\"assertion exchange failed\" error=\"{err}\""
            );
            (
                StatusCode::UNAUTHORIZED,
                jar,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Invalidates the session and returns to the login page.
///
/// GET /logout — invalidation is best-effort; the redirect always
/// happens.
pub async fn logout<S>(State(state): State<AppState<S>>, jar: CookieJar) -> Response
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let (jar, outcome) = LogoutAction::new(state.sessions.clone()).execute(jar);

    if let Err(err) = outcome {
        log::error!(
            target: "gatehouse::web",
            "msg=\"failed to clean up session during logout\" error=\"{err}\""
        );
    }

    (jar, Redirect::temporary("/login")).into_response()
}

/// Renders the home page.
///
/// GET / — gated.
pub async fn home() -> Html<&'static str> {
    Html(pages::HOME)
}

/// Renders the restricted page with the caller's identity.
///
/// GET /restricted — gated; the gate injects nothing, so the claims are
/// re-derived here.
pub async fn restricted<S>(State(state): State<AppState<S>>, jar: CookieJar) -> Response
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    match evaluate_session(
        &state.sessions,
        &state.codec,
        &state.config.session.token_field,
        &jar,
    ) {
        Ok(claims) => Html(pages::restricted(&claims.name, &claims.email)).into_response(),
        Err(err) => AppError(err).into_response(),
    }
}

/// Renders the unrestricted page.
///
/// GET /unrestricted — open to everyone.
pub async fn unrestricted() -> Html<&'static str> {
    Html(pages::UNRESTRICTED)
}

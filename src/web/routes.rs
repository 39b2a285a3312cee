use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::middleware::require_session;
use crate::config::AppConfig;
use crate::session::SessionStore;
use crate::token::TokenCodec;

/// Shared application state.
///
/// Everything here is read-only after startup and cheap to clone per
/// request.
#[derive(Clone)]
pub struct AppState<S: SessionStore> {
    pub config: Arc<AppConfig>,
    pub codec: TokenCodec,
    pub sessions: S,
}

/// Builds the application router.
///
/// `/` and `/restricted` sit behind the auth gate; the login flow and
/// `/unrestricted` stay open. The provider callback path comes from
/// configuration.
pub fn router<S>(state: AppState<S>) -> Router
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let gated = Router::new()
        .route("/", get(handlers::home))
        .route("/restricted", get(handlers::restricted::<S>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session::<S>,
        ));

    Router::new()
        .route("/login", get(handlers::login))
        .route("/auth/azure", get(handlers::azure_login::<S>))
        .route(
            &state.config.azure.redirect_path,
            get(handlers::azure_callback),
        )
        .route("/auth/azure/token", get(handlers::azure_token::<S>))
        .route("/logout", get(handlers::logout::<S>))
        .route("/unrestricted", get(handlers::unrestricted))
        .merge(gated)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Gatehouse - Azure AD implicit-flow web front-end.

use std::sync::Arc;

use axum::extract::Request;
use axum::ServiceExt;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing_subscriber::EnvFilter;

use gatehouse::config::AppConfig;
use gatehouse::session::CookieSessionStore;
use gatehouse::token::{TokenCodec, TokenConfig};
use gatehouse::web::{router, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_logging();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!(target: "gatehouse", "msg=\"refusing to start\" error=\"{err}\"");
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let token_config =
        match TokenConfig::new(config.session.signing_secret.clone(), config.session.expiry) {
            Ok(token_config) => token_config,
            Err(err) => {
                log::error!(target: "gatehouse", "msg=\"refusing to start\" error=\"{err}\"");
                eprintln!("{err}");
                std::process::exit(1);
            }
        };

    let state = AppState {
        codec: TokenCodec::new(token_config),
        sessions: CookieSessionStore::from_settings(&config.session),
        config: Arc::new(config),
    };

    let addr = format!("0.0.0.0:{}", state.config.http_port);

    // Most provider and browser callers omit trailing slashes
    // inconsistently; normalize before routing.
    let app = NormalizePathLayer::trim_trailing_slash().layer(router(state));

    log::info!(target: "gatehouse", "msg=\"listening\" addr=\"{addr}\"");

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            log::error!(target: "gatehouse", "msg=\"failed to bind\" addr=\"{addr}\" error=\"{err}\"");
            std::process::exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await {
        log::error!(target: "gatehouse", "msg=\"server terminated\" error=\"{err}\"");
        std::process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

//! # HTTP API
//!
//! axum-based JSON API for the portfolio front-end.
//!
//! Routes:
//! - `GET  /health`
//! - `GET  /api/projects`       (fail-soft)
//! - `GET  /api/experiences`    (fail-soft)
//! - `GET  /api/skills`
//! - `GET  /api/nav`
//! - `GET  /api/nav/visual?offset=N`
//! - `POST /api/contact`        (rate limited)
//!
//! Everything else falls through to the static front-end when one is
//! configured.

mod handlers;
mod types;

pub use handlers::ApiError;
pub use types::*;

use crate::config::ServerConfig;
use crate::content_client::ContentSource;
use crate::error::FolioError;
use crate::mailer::Mailer;
use axum::Router;
use axum::routing::{get, post};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<dyn ContentSource>,
    pub mailer: Arc<dyn Mailer>,
    /// Address contact messages are delivered to.
    pub inbox: Arc<str>,
    /// Server-wide quota on contact submissions.
    pub contact_limiter: Arc<DefaultDirectRateLimiter>,
}

impl AppState {
    pub fn new(
        content: Arc<dyn ContentSource>,
        mailer: Arc<dyn Mailer>,
        inbox: &str,
        contact_per_minute: NonZeroU32,
    ) -> Self {
        Self {
            content,
            mailer,
            inbox: Arc::from(inbox),
            contact_limiter: Arc::new(RateLimiter::direct(Quota::per_minute(contact_per_minute))),
        }
    }
}

/// Build the router. `static_dir`, when given, serves the built front-end for
/// every path the API does not claim.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/projects", get(handlers::projects))
        .route("/api/experiences", get(handlers::experiences))
        .route("/api/skills", get(handlers::skills))
        .route("/api/nav", get(handlers::nav))
        .route("/api/nav/visual", get(handlers::nav_visual))
        .route("/api/contact", post(handlers::contact))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until Ctrl-C.
pub async fn run_server(config: &ServerConfig, state: AppState) -> Result<(), FolioError> {
    let router = create_router(state, config.static_dir.as_deref());
    let listener = tokio::net::TcpListener::bind(&config.addr).await?;

    info!(addr = %config.addr, static_dir = ?config.static_dir, "folio server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("folio server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

//! HTTP surface: the page, the submit endpoint, and the polling endpoint.

pub mod error;
pub mod handlers;

use anyhow::Result;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::pages::Pages;
use crate::store::LatestMessageStore;

/// Shared state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LatestMessageStore>,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(store: Arc<LatestMessageStore>) -> Result<Self> {
        Ok(Self {
            store,
            pages: Arc::new(Pages::new()?),
        })
    }
}

/// Builds the router. Cross-origin requests are allowed from anywhere.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/send", post(handlers::send))
        .route("/stream", get(handlers::stream))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve until Ctrl+C. In-flight requests are allowed to finish.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available: run until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

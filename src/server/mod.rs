//! HTTP entry points.
//!
//! # Overview
//!
//! | Route                                 | Exporter                  |
//! |---------------------------------------|---------------------------|
//! | `/api/variants`, `/api/generate`      | [`Exporter::Variants`]    |
//! | `/api/simple`                         | [`Exporter::Simple`]      |
//! | `/api/accounting`                     | [`Exporter::Accounting`]  |
//! | `/api/products`                       | [`Exporter::Products`]    |
//! | `/health`                             | liveness probe            |
//!
//! Export routes accept `GET` and `POST`. Credentials come from the
//! environment captured at startup, then the query string, then the body
//! (JSON object or form-encoded), each under the names `SHOP_DOMAIN` and
//! `SHOP_TOKEN`. The products route reads the environment only.
//!
//! Responses:
//!
//! - 200 with `text/csv; charset=utf-8` and an attachment disposition
//! - 400 with a plain-text message when credentials are missing or malformed
//! - 500 with `Error: <message>` for every other failure
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_catalog_export::server::{serve, AppState};
//! use shopify_catalog_export::{Credentials, ExportConfig};
//!
//! let state = AppState::new(Credentials::from_env(), ExportConfig::builder());
//! serve("0.0.0.0:3000".parse()?, state).await?;
//! ```

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::{Credentials, ExportConfigBuilder};
use crate::export::Exporter;

pub use handlers::request_credentials;

/// Shared, immutable server state.
#[derive(Clone, Debug)]
pub struct AppState {
    env_credentials: Arc<Credentials>,
    base_config: Arc<ExportConfigBuilder>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AppState>();
};

impl AppState {
    /// Creates state from the environment credentials and a builder holding
    /// everything but the credentials (API version, base URL override).
    #[must_use]
    pub fn new(env_credentials: Credentials, base_config: ExportConfigBuilder) -> Self {
        Self {
            env_credentials: Arc::new(env_credentials),
            base_config: Arc::new(base_config),
        }
    }

    /// Returns the credentials captured from the environment.
    #[must_use]
    pub fn env_credentials(&self) -> &Credentials {
        &self.env_credentials
    }

    /// Returns a fresh copy of the base configuration builder.
    #[must_use]
    pub fn base_config(&self) -> ExportConfigBuilder {
        ExportConfigBuilder::clone(&self.base_config)
    }
}

/// Builds the router with every export route and `/health`.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new().route("/health", get(handlers::health));

    for exporter in Exporter::ALL {
        router = router.route(
            &format!("/api/{}", exporter.name()),
            handlers::export_route(exporter),
        );
    }

    router
        .route("/api/generate", handlers::export_route(Exporter::Variants))
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an I/O error if the address cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Catalog export server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

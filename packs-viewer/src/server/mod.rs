//! HTTP server
//!
//! [`PreviewServer`] owns the shared state and builds the router. Tests drive
//! [`PreviewServer::router`] in-process; the binary calls
//! [`PreviewServer::run`].
//!
//! # Example
//!
//! ```rust,no_run
//! use packs_viewer::{config::ViewerConfig, server::PreviewServer};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let server = PreviewServer::new(ViewerConfig::for_content_dir("./html"))?;
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

use crate::{
    browser,
    config::ViewerConfig,
    error::ViewerResult,
    handlers::{self, assets},
    random::RandomSource,
    state::ViewerState,
};
use anyhow::Context;
use axum::{extract::Request, routing::get, Router};
use std::{future::Future, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};
use tracing::Level;

/// The component preview server
#[derive(Clone)]
pub struct PreviewServer {
    state: ViewerState,
}

impl PreviewServer {
    /// Create a server that composes pages with the thread-local RNG
    ///
    /// # Errors
    ///
    /// Fails when the templates cannot be loaded.
    pub fn new(config: ViewerConfig) -> ViewerResult<Self> {
        Ok(Self {
            state: ViewerState::new(config)?,
        })
    }

    /// Create a server with an explicit random source
    ///
    /// # Errors
    ///
    /// Fails when the templates cannot be loaded.
    pub fn with_random(config: ViewerConfig, random: Arc<dyn RandomSource>) -> ViewerResult<Self> {
        Ok(Self {
            state: ViewerState::with_random(config, random)?,
        })
    }

    /// Shared state
    #[must_use]
    pub const fn state(&self) -> &ViewerState {
        &self.state
    }

    /// Configuration
    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        self.state.config()
    }

    /// Build the router with all routes and middleware
    pub fn router(&self) -> Router {
        let static_files = ServeDir::new(&self.config().static_dir);

        Router::new()
            .route("/", get(handlers::index))
            .route("/component", get(handlers::component))
            .route("/page", get(handlers::page))
            .route(&format!("{}/js/main.js", assets::PREFIX), get(assets::script))
            .route(
                &format!("{}/css/viewer.css", assets::PREFIX),
                get(assets::stylesheet),
            )
            .fallback_service(static_files)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                        tracing::span!(
                            Level::INFO,
                            "http_request",
                            method = %request.method(),
                            path = %request.uri().path(),
                        )
                    }))
                    .layer(CompressionLayer::new()),
            )
            .with_state(self.state.clone())
    }

    /// Bind the configured address and serve until Ctrl-C
    ///
    /// # Errors
    ///
    /// Fails when the address cannot be bound or the server stops with an
    /// I/O error.
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config().bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` completes
    ///
    /// # Errors
    ///
    /// Fails when the server stops with an I/O error.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let config = self.config();
        let url = config.local_url();

        tracing::info!(
            addr = %listener.local_addr()?,
            content_dir = %config.content_dir.display(),
            static_dir = %config.static_dir.display(),
            "Server running on port {}",
            config.port
        );

        if config.open_browser {
            browser::open(config.platform, &url);
        }

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .context("server error")?;

        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down gracefully");
}

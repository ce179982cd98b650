//! Application entry point: route registration and the serve loop.
//!
//! Routes are registered on an [`App`] before it runs. `run` freezes the
//! route table, so there is no way to add routes to a running server.

use std::net::{AddrParseError, SocketAddr};
use std::sync::Arc;

use axum::http::method::InvalidMethod;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ConfigError, ServerConfig};
use crate::http::{HttpServer, RequestContext};
use crate::lifecycle::{signals, Shutdown};
use crate::net::{self, ListenerError};
use crate::observability::metrics;
use crate::routing::{HandlerResult, MethodSet, Router};

/// Errors that stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("Failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("Invalid HTTP method: {0}")]
    Method(#[from] InvalidMethod),

    #[error("Invalid metrics address '{address}': {source}")]
    MetricsAddress {
        address: String,
        #[source]
        source: AddrParseError,
    },

    #[error("Failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

/// A router application: a route table plus the server that runs it.
pub struct App {
    config: ServerConfig,
    router: Router,
    shutdown: Shutdown,
}

impl App {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            router: Router::new(),
            shutdown: Shutdown::new(),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Register `handler` for `template`. Registering the same template again
    /// replaces the earlier handler.
    pub fn add_route<M, F>(&mut self, methods: M, template: &str, handler: F) -> &mut Self
    where
        M: Into<MethodSet>,
        F: Fn(&RequestContext, &[String]) -> HandlerResult + Send + Sync + 'static,
    {
        self.router.register(methods, template, handler);
        self
    }

    /// A handle that can stop the server once it runs.
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Request shutdown of the server.
    ///
    /// The request is kept until the serve loop sees it, so stopping before
    /// the server starts makes `run` return as soon as it is listening. Use
    /// [`App::shutdown_handle`] to stop an app that `run` has consumed.
    pub fn stop(&self) {
        self.shutdown.trigger();
    }

    /// Serve until stopped or interrupted, blocking the calling thread.
    ///
    /// Requests are handled on a single-threaded runtime.
    pub fn run(self) -> Result<(), AppError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(AppError::Runtime)?;
        runtime.block_on(self.serve())
    }

    /// Bind the configured address and serve.
    pub async fn serve(self) -> Result<(), AppError> {
        let listener = net::bind(&self.config.listener).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve_on(self, listener: TcpListener) -> Result<(), AppError> {
        let observability = &self.config.observability;
        if observability.metrics_enabled {
            let addr = observability
                .metrics_address
                .parse::<SocketAddr>()
                .map_err(|source| AppError::MetricsAddress {
                    address: observability.metrics_address.clone(),
                    source,
                })?;
            metrics::init_metrics(addr)?;
        }

        let server = HttpServer::new(Arc::new(self.router), &self.config.listener);
        let stopped = self.shutdown.subscribe();
        tokio::spawn(signals::forward_signals(self.shutdown.clone()));

        server.run(listener, stopped).await.map_err(AppError::Serve)
    }
}

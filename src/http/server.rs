//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum service around the dispatcher
//! - Wire up middleware (tracing, request ID, in-flight limit)
//! - Serve on a bound listener until shutdown is signalled
//!
//! # Design Decisions
//! - A single fallback handler receives every request; routing is ours,
//!   not axum's
//! - The in-flight limit defaults to 1, so requests are handled one at a time
//! - No request timeout: a hung handler holds the server

use axum::{
    extract::State,
    http::{HeaderMap, Method, Uri},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ListenerConfig;
use crate::http::dispatcher::Dispatcher;
use crate::http::request::RequestContext;
use crate::http::response::Response;
use crate::lifecycle::Shutdown;
use crate::routing::Router as RouteTable;

/// HTTP transport for a frozen route table.
pub struct HttpServer {
    app: Router,
    dispatcher: Dispatcher,
}

impl HttpServer {
    /// Create a new HTTP server serving `routes`.
    pub fn new(routes: Arc<RouteTable>, config: &ListenerConfig) -> Self {
        let dispatcher = Dispatcher::new(routes);
        let app = Self::build_router(config, dispatcher.clone());
        Self { app, dispatcher }
    }

    /// Build the axum router with all middleware layers.
    fn build_router(config: &ListenerConfig, dispatcher: Dispatcher) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(dispatcher)
            .layer(ConcurrencyLimitLayer::new(config.max_in_flight.max(1)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The assembled service, for embedding or in-process testing.
    pub fn into_router(self) -> Router {
        self.app
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: watch::Receiver<bool>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.dispatcher.router().len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(Shutdown::stopped(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Forward every request to the dispatcher.
async fn dispatch_handler(
    State(dispatcher): State<Dispatcher>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let ctx = RequestContext::new(method, uri.path()).with_headers(&headers);
    dispatcher.handle_context(&ctx)
}

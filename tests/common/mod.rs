//! Shared utilities for integration testing.

use std::net::SocketAddr;

use segment_router::{App, ServerConfig, Shutdown};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A running server bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<Result<(), segment_router::AppError>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start `app` on 127.0.0.1 with an OS-assigned port.
pub async fn spawn_app(app: App) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = app.shutdown_handle();

    let task = tokio::spawn(app.serve_on(listener));

    TestServer {
        addr,
        shutdown,
        task,
    }
}

/// An app with the default configuration and no routes.
pub fn empty_app() -> App {
    App::new(ServerConfig::default())
}

/// HTTP client that never reuses connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

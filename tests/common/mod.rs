//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use data_processor::config::ServiceConfig;
use data_processor::http::HttpServer;
use data_processor::lifecycle::Shutdown;
use data_processor::processing::Transform;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A server running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Start the service with `config` and the default transform.
pub async fn start_server(config: ServiceConfig) -> TestServer {
    spawn(HttpServer::new(config)).await
}

/// Start the service with a custom transform.
#[allow(dead_code)]
pub async fn start_server_with(config: ServiceConfig, transform: Arc<dyn Transform>) -> TestServer {
    spawn(HttpServer::with_transform(config, transform)).await
}

async fn spawn(server: HttpServer) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    // Listener is already bound; a short yield lets the accept loop start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// HTTP client that never pools, so shutdown is not held open by idle sockets.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

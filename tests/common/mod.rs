//! Shared test harness.
//!
//! `TestServer` runs the full application on its own runtime so a test can
//! kill the server outright; dropping the runtime drops every connection
//! task and closes its sockets, which is how "server process stops" is
//! simulated for reconnect tests.

use std::net::SocketAddr;
use std::time::Duration;
use tripsync::backend::relay::broadcaster::Broadcaster;
use tripsync::backend::relay::registry::ConnectionRegistry;
use tripsync::backend::routes::router::create_router;
use tripsync::backend::server::config::ServerConfig;
use tripsync::backend::server::state::AppState;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// A live server instance on its own runtime
pub struct TestServer {
    pub addr: SocketAddr,
    pub broadcaster: Broadcaster,
    pub registry: ConnectionRegistry,
    runtime: Option<tokio::runtime::Runtime>,
}

impl TestServer {
    /// Spawn on an ephemeral port with default (service-less) config
    pub fn spawn() -> Self {
        Self::spawn_with_config("127.0.0.1:0".parse().unwrap(), ServerConfig::default())
    }

    /// Spawn bound to a specific address (used to restart on the same port)
    pub fn spawn_at(addr: SocketAddr) -> Self {
        Self::spawn_with_config(addr, ServerConfig::default())
    }

    /// Spawn with explicit configuration
    pub fn spawn_with_config(bind: SocketAddr, config: ServerConfig) -> Self {
        let state = AppState::standalone(config);
        let broadcaster = state.broadcaster.clone();
        let registry = state.registry.clone();
        let router = create_router(state);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("failed to build server runtime");

        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        runtime.spawn(async move {
            let socket = tokio::net::TcpSocket::new_v4().expect("socket");
            // Reuse lets a restarted server rebind while old connections
            // from its predecessor linger in TIME_WAIT.
            socket.set_reuseaddr(true).expect("reuseaddr");
            socket.bind(bind).expect("bind");
            let listener = socket.listen(1024).expect("listen");
            let _ = addr_tx.send(listener.local_addr().expect("local_addr"));
            axum::serve(listener, router).await.expect("serve");
        });

        let addr = addr_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("server did not start");

        Self {
            addr,
            broadcaster,
            registry,
            runtime: Some(runtime),
        }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Kill the server: all tasks die, all sockets close
    pub fn stop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Issue a token the server's middleware will accept
pub fn issue_token(secret: &str) -> String {
    let claims = serde_json::json!({
        "sub": "11111111-2222-3333-4444-555555555555",
        "email": "kia@example.com",
        "exp": chrono::Utc::now().timestamp() + 3600,
    });
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode token")
}

/// Poll a condition until it holds or the timeout expires
pub async fn wait_until<F: Fn() -> bool>(what: &str, timeout: Duration, condition: F) {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if condition() {
            return;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for: {}",
            what
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

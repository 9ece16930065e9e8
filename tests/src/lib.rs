//! Shared harness for the end-to-end suites: boots the API on an ephemeral
//! port over a chosen store driver and hands back gateways pointed at it.

use druk_client::Gateway;
use druk_core::{Registry, Store};
use druk_server::{app, AppState};
use druk_store_memory::MemoryStore;
use druk_store_sqlite::SqliteStore;

use std::sync::Arc;

pub const ADMIN_PASSWORD: &str = "dzong-keeper";

/// Which store driver backs the server under test. Every suite runs against
/// both.
#[derive(Debug, Clone, Copy)]
pub enum Backend {
    Memory,
    Sqlite,
}

pub struct TestServer {
    pub base_url: String,
}

impl TestServer {
    pub async fn start(backend: Backend) -> Self {
        let registry = Arc::new(Registry::builtin());
        let store: Arc<dyn Store> = match backend {
            Backend::Memory => Arc::new(MemoryStore::new(registry.clone())),
            Backend::Sqlite => Arc::new(
                SqliteStore::in_memory(registry.clone()).expect("sqlite store must initialize"),
            ),
        };
        let state = AppState::shared(registry, store, ADMIN_PASSWORD.to_string());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral port bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app(state))
                .await
                .expect("server task");
        });

        Self {
            base_url: format!("http://{addr}"),
        }
    }

    /// A gateway with no session: reads work, writes get 401.
    pub fn gateway(&self) -> Gateway {
        Gateway::new(self.base_url.clone())
    }

    /// A gateway holding a live admin session.
    pub async fn admin(&self) -> Gateway {
        let gateway = self.gateway();
        gateway
            .login(ADMIN_PASSWORD)
            .await
            .expect("admin login must succeed");
        gateway
    }
}

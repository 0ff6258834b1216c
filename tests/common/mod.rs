#![allow(dead_code)]

use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lodgr::client::{ApiClient, MemoryTokenStore, NoticeSink, TokenStore};
use lodgr::config::ClientConfig;
use lodgr::mock::{self, MockState};

/// Bind the mock backend on an ephemeral port and serve it in the
/// background for the duration of the test.
pub async fn spawn_mock() -> (SocketAddr, Arc<MockState>) {
    let state = Arc::new(MockState::seeded());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let serve_state = Arc::clone(&state);
    tokio::spawn(async move {
        mock::serve(listener, serve_state).await.unwrap();
    });
    (addr, state)
}

/// Serve an arbitrary router (for stubbing degenerate backend behavior).
pub async fn spawn_router(router: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub fn client_config(addr: SocketAddr) -> ClientConfig {
    ClientConfig {
        base_url: format!("http://{addr}/api"),
        timeout_secs: 5,
    }
}

pub fn client_for(
    addr: SocketAddr,
    tokens: Arc<dyn TokenStore>,
    notices: Arc<dyn NoticeSink>,
) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(&client_config(addr), tokens, notices).unwrap())
}

pub fn memory_tokens() -> Arc<MemoryTokenStore> {
    Arc::new(MemoryTokenStore::default())
}

/// Notice sink that records everything for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotices {
    pub successes: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl NoticeSink for RecordingNotices {
    fn success(&self, message: &str) {
        self.successes.lock().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().push(message.to_string());
    }
}

/// Token store that counts clear calls, for the teardown-exactly-once
/// assertions.
#[derive(Debug, Default)]
pub struct CountingTokenStore {
    inner: MemoryTokenStore,
    clears: AtomicUsize,
}

impl CountingTokenStore {
    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl TokenStore for CountingTokenStore {
    fn load(&self) -> Option<String> {
        self.inner.load()
    }

    fn save(&self, token: &str) {
        self.inner.save(token);
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear();
    }
}

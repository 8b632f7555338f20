//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use eportfolio::config::{Config, SecureString};
use eportfolio::notify::Toaster;
use eportfolio::session::{
    LogNavigator, MemoryStorage, SessionStorage, StaticTokenProvider, THEME_KEY,
};
use eportfolio::store::{Collaborators, Portfolio};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use mock_backend::MockBackend;

pub const TEST_TOKEN: &str = "test-token";

/// Config pointing at `base_url` with short timeouts.
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_seconds = 5;
    config.api.connect_timeout_seconds = 2;
    config.session.reauth_cooldown_ms = 3000;
    config
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// A wired data layer with recording collaborators.
pub struct Harness {
    pub backend: MockBackend,
    pub portfolio: Portfolio,
    pub toaster: Arc<Toaster>,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<LogNavigator>,
    pub tokens: Arc<StaticTokenProvider>,
}

impl Harness {
    pub async fn start() -> Self {
        let backend = MockBackend::start().await;
        Self::with_config(backend, |_| {}).await
    }

    pub async fn with_config(backend: MockBackend, tweak: impl FnOnce(&mut Config)) -> Self {
        let mut config = test_config(&backend.base_url());
        tweak(&mut config);

        let toaster = Arc::new(Toaster::new(config.notifications.max_visible));
        let storage = Arc::new(MemoryStorage::new());
        storage.set(THEME_KEY, "dark").unwrap();
        let navigator = Arc::new(LogNavigator::new());
        let tokens = Arc::new(StaticTokenProvider::new(Some(SecureString::new(TEST_TOKEN))));

        let portfolio = Portfolio::new(
            &config,
            Collaborators {
                tokens: tokens.clone(),
                storage: storage.clone(),
                navigator: navigator.clone(),
                notifier: toaster.clone(),
            },
        )
        .expect("Failed to build portfolio");

        Self {
            backend,
            portfolio,
            toaster,
            storage,
            navigator,
            tokens,
        }
    }
}

/// Polls `condition` until it holds or `timeout` elapses.
pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

/// `{data: [...], meta_data: {...}}` list envelope.
pub fn list_body(items: serde_json::Value, page: u32, limit: u32, total: u64) -> serde_json::Value {
    let pages = if limit == 0 {
        0
    } else {
        total.div_ceil(limit as u64)
    };
    serde_json::json!({
        "data": items,
        "meta_data": {
            "page": page,
            "limit": limit,
            "items": total,
            "pages": pages,
        }
    })
}

pub fn course_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "code": format!("C-{id}"),
    })
}

pub fn evidence_json(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "learner_id": "l1",
    })
}

pub fn notification_json(id: &str, read: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("Notification {id}"),
        "message": "body",
        "read": read,
    })
}

/// Waits until at least `count` requests to `prefix` were captured.
pub async fn wait_for_requests(
    backend: &MockBackend,
    prefix: &str,
    count: usize,
    timeout: Duration,
) -> bool {
    let start = std::time::Instant::now();
    loop {
        if backend.requests_to(prefix).await.len() >= count {
            return true;
        }
        if start.elapsed() >= timeout {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

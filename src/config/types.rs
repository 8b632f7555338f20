use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub paging: PagingConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to (e.g. "https://api.example.com/api/v1").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Session and re-authentication settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where the navigator is sent when the backend rejects the session.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// How long further 401s are ignored after a redirect (default: 3000).
    #[serde(default = "default_reauth_cooldown_ms")]
    pub reauth_cooldown_ms: u64,
    /// File backing the persisted session key-value store.
    /// Defaults to `<data dir>/eportfolio/session.json`.
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
}

/// Toast queue settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Maximum number of toasts visible at once (default: 3).
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
}

/// Pagination defaults for list fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

fn default_base_url() -> String {
    "http://127.0.0.1:4000/api/v1".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_reauth_cooldown_ms() -> u64 {
    3000
}

fn default_max_visible() -> usize {
    3
}

fn default_page_size() -> u32 {
    10
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.connect_timeout_seconds))
    }
}

impl SessionConfig {
    pub fn reauth_cooldown(&self) -> Duration {
        Duration::from_millis(self.reauth_cooldown_ms)
    }

    /// Resolved location of the session storage file.
    pub fn storage_path(&self) -> PathBuf {
        self.storage_path.clone().unwrap_or_else(|| {
            let data_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            data_dir.join("eportfolio").join("session.json")
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            reauth_cooldown_ms: default_reauth_cooldown_ms(),
            storage_path: None,
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible(),
        }
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
        }
    }
}

//! Configuration for the data layer.
//!
//! Loaded from `~/.config/eportfolio/config.toml` (or the platform
//! equivalent); a missing file yields defaults.

mod credentials;
mod loader;
mod types;

pub use credentials::SecureString;
pub use loader::ConfigError;
pub use types::{ApiConfig, Config, NotificationsConfig, PagingConfig, SessionConfig};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::config::SecureString;

/// Source of bearer tokens.
///
/// Called before every request; the client never caches the result. A
/// `None` means the request goes out unauthenticated.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Option<SecureString>;
}

/// Token provider holding a single replaceable token.
#[derive(Debug, Default)]
pub struct StaticTokenProvider {
    token: RwLock<Option<SecureString>>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<SecureString>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    pub fn set(&self, token: Option<SecureString>) {
        *self.token.write() = token;
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Option<SecureString> {
        self.token.read().clone().filter(|t| !t.is_empty())
    }
}

/// Reads the token from an environment variable on every request.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn access_token(&self) -> Option<SecureString> {
        std::env::var(&self.var)
            .ok()
            .filter(|value| !value.is_empty())
            .map(SecureString::new)
    }
}

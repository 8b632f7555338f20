use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::{Handle, RuntimeFlavor};

use super::navigator::Navigator;
use super::storage::SessionStorage;

/// Reaction to a rejected session, injected into the HTTP client.
pub trait SessionGuard: Send + Sync {
    /// Called for every 401. Returns `true` only for the call that
    /// actually performed the logout.
    fn on_unauthorized(&self) -> bool;

    /// Whether a logout is in progress (inside the cooldown window).
    fn is_reauthenticating(&self) -> bool;
}

/// Single-writer guard against redirect storms.
///
/// The first 401 swaps the flag, wipes session storage and navigates to
/// the login path; every 401 that arrives before the cooldown expires is
/// a no-op.
pub struct ReauthGuard {
    active: Arc<AtomicBool>,
    cooldown: Duration,
    login_path: String,
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
}

impl ReauthGuard {
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
        login_path: impl Into<String>,
        cooldown: Duration,
    ) -> Self {
        Self {
            active: Arc::new(AtomicBool::new(false)),
            cooldown,
            login_path: login_path.into(),
            storage,
            navigator,
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    fn schedule_reset(&self) {
        let active = Arc::clone(&self.active);
        let cooldown = self.cooldown;
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(cooldown).await;
                    active.store(false, Ordering::SeqCst);
                    tracing::debug!("Re-auth cooldown elapsed");
                });
            }
            Err(_) => {
                std::thread::spawn(move || {
                    std::thread::sleep(cooldown);
                    active.store(false, Ordering::SeqCst);
                });
            }
        }
    }
}

impl SessionGuard for ReauthGuard {
    fn on_unauthorized(&self) -> bool {
        if self.active.swap(true, Ordering::SeqCst) {
            tracing::debug!("401 received while re-auth already in progress; ignoring");
            return false;
        }

        tracing::warn!(
            login_path = %self.login_path,
            cooldown_ms = self.cooldown.as_millis() as u64,
            "Session rejected by backend; clearing session storage"
        );

        let storage = Arc::clone(&self.storage);
        if let Err(e) = run_blocking(move || storage.clear()) {
            tracing::warn!(error = %e, "Failed to clear session storage");
        }
        self.schedule_reset();
        self.navigator.replace(&self.login_path);
        true
    }

    fn is_reauthenticating(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Runs storage I/O from the response path. On a multi-thread runtime the
/// worker hands its other tasks off first; elsewhere it runs inline.
fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

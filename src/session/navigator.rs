use parking_lot::Mutex;

/// Hard-navigation primitive (the `location.replace` of a browser host).
pub trait Navigator: Send + Sync {
    fn replace(&self, path: &str);
}

/// Navigator for headless hosts: logs the redirect and remembers it.
#[derive(Debug, Default)]
pub struct LogNavigator {
    history: Mutex<Vec<String>>,
}

impl LogNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every path this navigator was sent to, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }
}

impl Navigator for LogNavigator {
    fn replace(&self, path: &str) {
        tracing::warn!(path = %path, "Navigating away: session is no longer valid");
        self.history.lock().push(path.to_string());
    }
}

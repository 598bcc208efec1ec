//! Navigation seam.
//!
//! The session store reads the current route and requests navigation; the
//! real router lives in the embedding UI. [`MemoryNavigator`] backs tests
//! and router-less embeddings.

use parking_lot::Mutex;

/// Read the current route and request navigation without coupling the
/// session logic to a concrete router.
pub trait Navigator: Send + Sync {
    /// Path of the route currently shown.
    fn current_path(&self) -> String;

    /// Request navigation to the given path.
    fn navigate(&self, path: &str);
}

/// In-memory navigator tracking the current path and every visit.
pub struct MemoryNavigator {
    current: Mutex<String>,
    visits: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    /// Start at the given path.
    pub fn new(initial: &str) -> Self {
        Self {
            current: Mutex::new(initial.to_string()),
            visits: Mutex::new(Vec::new()),
        }
    }

    /// Every path navigated to, in order.
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().clone()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.current.lock().clone()
    }

    fn navigate(&self, path: &str) {
        tracing::debug!(path, "Navigation requested");
        *self.current.lock() = path.to_string();
        self.visits.lock().push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_updates_current_path_and_log() {
        let nav = MemoryNavigator::new("/auth/login");
        assert_eq!(nav.current_path(), "/auth/login");
        assert!(nav.visits().is_empty());

        nav.navigate("/main");
        assert_eq!(nav.current_path(), "/main");
        assert_eq!(nav.visits(), vec!["/main".to_string()]);
    }
}

//! Durable bearer-token storage.
//!
//! The session store treats token storage as an infallible key/value slot:
//! implementations absorb their own I/O failures (log a warning, degrade to
//! "no token") so a broken disk behaves like a missing token rather than a
//! crashed login.

use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the token file inside the state directory.
const TOKEN_FILE: &str = "session.token";

/// Persist, retrieve, and clear the bearer token across process restarts.
pub trait TokenStore: Send + Sync {
    /// Currently stored token, if any.
    fn load(&self) -> Option<String>;

    /// Persist the token.
    fn save(&self, token: &str);

    /// Remove any stored token. Idempotent.
    fn clear(&self);
}

// ── In-memory store ──────────────────────────────────────────────

/// In-memory token store for tests and embeddings without durable storage.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock() = None;
    }
}

// ── File-backed store ────────────────────────────────────────────

/// File-backed token store: a single file under a caller-supplied state
/// directory, created on demand.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store the token under `state_dir`.
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(TOKEN_FILE),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(_) => None,
        }
    }

    fn save(&self, token: &str) {
        if let Some(dir) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(dir) {
                tracing::warn!("Failed to create token state directory: {e}");
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, token) {
            tracing::warn!("Failed to persist session token: {e}");
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to clear session token: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert!(store.load().is_none());

        store.save("tok-1");
        assert_eq!(store.load().as_deref(), Some("tok-1"));

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn file_store_roundtrips_across_instances() {
        let tmp = TempDir::new().unwrap();

        let store = FileTokenStore::new(tmp.path());
        store.save("tok-persisted");

        // A fresh instance over the same directory sees the token.
        let reopened = FileTokenStore::new(tmp.path());
        assert_eq!(reopened.load().as_deref(), Some("tok-persisted"));
    }

    #[test]
    fn file_store_clear_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = FileTokenStore::new(tmp.path());

        store.save("tok-1");
        store.clear();
        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn file_store_missing_directory_reads_as_absent() {
        let tmp = TempDir::new().unwrap();
        let store = FileTokenStore::new(&tmp.path().join("never-created"));
        assert!(store.load().is_none());
    }

    #[test]
    fn file_store_blank_file_reads_as_absent() {
        let tmp = TempDir::new().unwrap();
        let store = FileTokenStore::new(tmp.path());

        store.save("  \n");
        assert!(store.load().is_none());
    }

    #[test]
    fn file_store_creates_state_directory_on_save() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("state").join("session");

        let store = FileTokenStore::new(&nested);
        store.save("tok-nested");
        assert_eq!(store.load().as_deref(), Some("tok-nested"));
    }
}

//! Session capabilities injected into the client
//!
//! Browser globals (local storage, `window.location`) are reached only through
//! these traits, so the same client runs in a browser, on a server during
//! rendering, in a CLI, or in tests.

use super::error::ClientError;
use std::sync::{Arc, Mutex, RwLock};

/// Storage key holding the session token
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Route the user is sent to when the session is rejected
pub const LOGIN_ROUTE: &str = "/login";

/// Persistent slot for the session token
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Read the current token, if any
    fn get_token(&self) -> Option<String>;

    /// Persist a token, replacing any previous one
    fn set_token(&self, token: &str) -> Result<(), ClientError>;

    /// Delete the token. Deleting an absent token is not an error.
    fn remove_token(&self) -> Result<(), ClientError>;
}

/// Navigation capability used to send the user to a route
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// In-process token store
#[derive(Debug, Default, Clone)]
pub struct MemoryCredentialStore {
    token: Arc<RwLock<Option<String>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn set_token(&self, token: &str) -> Result<(), ClientError> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| ClientError::Storage("token lock poisoned".into()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn remove_token(&self) -> Result<(), ClientError> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| ClientError::Storage("token lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}

/// Store for contexts without persistent storage, such as server-side
/// rendering. Always empty; writes are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCredentialStore;

impl CredentialStore for NullCredentialStore {
    fn get_token(&self) -> Option<String> {
        None
    }

    fn set_token(&self, _token: &str) -> Result<(), ClientError> {
        Ok(())
    }

    fn remove_token(&self) -> Result<(), ClientError> {
        Ok(())
    }
}

/// Navigator for contexts without a browser window. Does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNavigator;

impl Navigator for NullNavigator {
    fn navigate(&self, _route: &str) {}
}

/// Navigator that records every route it is asked to visit
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    routes: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of navigations so far
    pub fn count(&self) -> usize {
        self.routes().len()
    }

    /// Routes visited, oldest first
    pub fn routes(&self) -> Vec<String> {
        self.routes
            .lock()
            .map(|routes| routes.clone())
            .unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.get_token(), None);

        store.set_token("abc123").unwrap();
        assert_eq!(store.get_token().as_deref(), Some("abc123"));

        store.remove_token().unwrap();
        store.remove_token().unwrap();
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn test_memory_store_clones_share_slot() {
        let store = MemoryCredentialStore::with_token("first");
        let other = store.clone();
        other.set_token("second").unwrap();
        assert_eq!(store.get_token().as_deref(), Some("second"));
    }

    #[test]
    fn test_null_store_is_always_empty() {
        let store = NullCredentialStore;
        store.set_token("ignored").unwrap();
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn test_recording_navigator() {
        let navigator = RecordingNavigator::new();
        navigator.navigate(LOGIN_ROUTE);
        assert_eq!(navigator.count(), 1);
        assert_eq!(navigator.routes(), vec!["/login".to_string()]);
    }

    #[test]
    fn test_recording_navigator_count_follows_routes_across_clones() {
        let navigator = RecordingNavigator::new();
        let shared = navigator.clone();
        shared.navigate("/login");
        shared.navigate("/signin");
        assert_eq!(navigator.count(), 2);
        assert_eq!(navigator.count(), navigator.routes().len());
    }
}

//! Token persistence in `window.localStorage`

use crate::client::is_browser;
use todo_http::{ClientError, CredentialStore, TOKEN_STORAGE_KEY};
use tracing::debug;
use web_sys::Storage;

/// Keeps the session token under the `token` key of `localStorage`
///
/// The value is stored raw, not JSON encoded, so it stays readable by other
/// scripts on the page. When storage is unavailable (no window, storage
/// disabled, sandboxed frame) reads return nothing and writes are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

/// Get localStorage, if this context has one
fn local_storage() -> Option<Storage> {
    if !is_browser() {
        return None;
    }
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl CredentialStore for LocalStorageStore {
    fn get_token(&self) -> Option<String> {
        local_storage()?.get_item(TOKEN_STORAGE_KEY).ok().flatten()
    }

    fn set_token(&self, token: &str) -> Result<(), ClientError> {
        let Some(storage) = local_storage() else {
            debug!("localStorage unavailable, token not saved");
            return Ok(());
        };
        storage
            .set_item(TOKEN_STORAGE_KEY, token)
            .map_err(|e| ClientError::Storage(format!("localStorage write failed: {e:?}")))
    }

    fn remove_token(&self) -> Result<(), ClientError> {
        let Some(storage) = local_storage() else {
            return Ok(());
        };
        debug!("Removing token from localStorage");
        storage
            .remove_item(TOKEN_STORAGE_KEY)
            .map_err(|e| ClientError::Storage(format!("localStorage delete failed: {e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_storage_is_silent() {
        if cfg!(target_arch = "wasm32") {
            return;
        }
        assert!(local_storage().is_none());

        let store = LocalStorageStore;
        assert_eq!(store.get_token(), None);
        assert!(store.set_token("abc123").is_ok());
        assert!(store.remove_token().is_ok());
        assert_eq!(store.get_token(), None);
    }
}

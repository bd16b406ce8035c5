//! File-backed session for the CLI

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use todo_http::{ClientError, CredentialStore, Navigator, TOKEN_STORAGE_KEY};
use tracing::{debug, warn};

/// Stores the session token in `<data_dir>/token`
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(TOKEN_STORAGE_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn get_token(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn set_token(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ClientError::Storage(e.to_string()))?;
        }
        fs::write(&self.path, token).map_err(|e| ClientError::Storage(e.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(|e| ClientError::Storage(e.to_string()))?;
        }

        debug!("Saved token to {:?}", self.path);
        Ok(())
    }

    fn remove_token(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(e.to_string())),
        }
    }
}

/// A terminal cannot be redirected, so point the user at `todo login` instead
#[derive(Debug, Default, Clone, Copy)]
pub struct HintNavigator;

impl Navigator for HintNavigator {
    fn navigate(&self, route: &str) {
        warn!("Session is no longer valid ({route}). Run `todo login` to sign in again.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(&dir.path().join("nested"));
        assert_eq!(store.get_token(), None);

        store.set_token("abc123").unwrap();
        assert_eq!(store.get_token().as_deref(), Some("abc123"));
        assert!(store.path().ends_with("token"));

        store.remove_token().unwrap();
        assert_eq!(store.get_token(), None);
        // Removing twice is fine
        store.remove_token().unwrap();
    }

    #[test]
    fn test_file_store_ignores_blank_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path());
        fs::write(store.path(), "  \n").unwrap();
        assert_eq!(store.get_token(), None);
    }
}

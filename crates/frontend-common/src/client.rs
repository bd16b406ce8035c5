//! Browser client construction

use crate::navigation::WindowNavigator;
use crate::storage::LocalStorageStore;
use std::sync::Arc;
use todo_http::{ApiClient, ApiConfig, ClientError};

/// Whether the code is running with a browser `window`
pub fn is_browser() -> bool {
    cfg!(target_arch = "wasm32") && web_sys::window().is_some()
}

/// Build a client backed by `localStorage` and `window.location`
pub fn create_browser_client(config: ApiConfig) -> Result<ApiClient, ClientError> {
    ApiClient::builder()
        .config(config)
        .credential_store(Arc::new(LocalStorageStore))
        .navigator(Arc::new(WindowNavigator))
        .build()
}

//! Browser tests, run with `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use todo_frontend_common::{LocalStorageStore, is_browser};
use todo_http::{CredentialStore, TOKEN_STORAGE_KEY};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_token_roundtrip_in_local_storage() {
    assert!(is_browser());
    let store = LocalStorageStore;

    store.set_token("abc123").unwrap();
    assert_eq!(store.get_token().as_deref(), Some("abc123"));

    let raw = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(TOKEN_STORAGE_KEY).ok().flatten());
    assert_eq!(raw.as_deref(), Some("abc123"));

    store.remove_token().unwrap();
    assert_eq!(store.get_token(), None);
}

//! Browser side of the to-do API client
//!
//! Provides [`LocalStorageStore`] and [`WindowNavigator`], the browser
//! implementations of the capabilities `todo-http` expects, plus a factory
//! that wires them into an [`ApiClient`](todo_http::ApiClient).
//!
//! Outside a browser (server-side rendering, native tests) every capability
//! here degrades to a silent no-op.

pub mod client;
pub mod config;
pub mod logging;
pub mod navigation;
pub mod storage;

pub use client::{create_browser_client, is_browser};
pub use config::{FALLBACK_API_URL, resolve_build_config};
pub use logging::init_browser_logging;
pub use navigation::WindowNavigator;
pub use storage::LocalStorageStore;

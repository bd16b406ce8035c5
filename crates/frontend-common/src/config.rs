//! Build-time API configuration
//!
//! Browser bundles have no process environment. `NEXT_PUBLIC_API_URL` and
//! `NODE_ENV` are captured when the crate is compiled.

use todo_http::{ApiConfig, ConfigError, Environment, MissingUrlPolicy};

/// Production API used when a bundle was built without `NEXT_PUBLIC_API_URL`
pub const FALLBACK_API_URL: &str = "https://syedahafsa58-todo-phase2.hf.space";

/// Resolve the configuration baked into this build
///
/// # Errors
///
/// Returns an error if the URL is missing under `policy`, or is not a valid
/// http(s) URL
pub fn resolve_build_config(policy: &MissingUrlPolicy) -> Result<ApiConfig, ConfigError> {
    let environment: Environment = option_env!("NODE_ENV")
        .and_then(|value| value.parse().ok())
        .unwrap_or_default();
    ApiConfig::resolve(option_env!("NEXT_PUBLIC_API_URL"), environment, policy)
}

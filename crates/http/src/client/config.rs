//! API base URL resolution
//!
//! The base URL is resolved once, at startup, into an [`ApiConfig`] that is
//! handed to [`ApiClient::builder`](super::ApiClient::builder). Nothing in this
//! crate reads the environment behind the caller's back.

use super::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Environment variable holding the API base URL
pub const API_URL_VAR: &str = "NEXT_PUBLIC_API_URL";

/// Execution context the client runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// What to do when no base URL is configured
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MissingUrlPolicy {
    /// Refuse to build a configuration
    #[default]
    FailFast,
    /// Use the given URL instead
    Fallback(String),
}

/// Resolved API configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    environment: Environment,
}

/// Variables picked out of the environment source
#[derive(Debug, Default, Deserialize)]
struct EnvSettings {
    next_public_api_url: Option<String>,
    node_env: Option<String>,
    app_env: Option<String>,
}

impl ApiConfig {
    /// Resolve a development configuration from an explicit URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is blank or not an absolute http(s) URL
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        Self::resolve(
            Some(base_url.as_ref()),
            Environment::Development,
            &MissingUrlPolicy::FailFast,
        )
    }

    /// Resolve the base URL from a raw configured value
    ///
    /// Trailing slashes are stripped. In production an `http://` prefix is
    /// upgraded to `https://`, and a loopback URL counts as not configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBaseUrl`] when nothing usable is configured
    /// under [`MissingUrlPolicy::FailFast`], or [`ConfigError::InvalidBaseUrl`]
    /// when the result is not an absolute http(s) URL.
    pub fn resolve(
        raw: Option<&str>,
        environment: Environment,
        policy: &MissingUrlPolicy,
    ) -> Result<Self, ConfigError> {
        let configured = raw.map(str::trim).filter(|url| !url.is_empty()).filter(|url| {
            if environment.is_production() && is_loopback(url) {
                warn!(url = %url, "Ignoring loopback API URL in production");
                false
            } else {
                true
            }
        });

        let chosen = match (configured, policy) {
            (Some(url), _) => url.to_string(),
            (None, MissingUrlPolicy::Fallback(fallback)) => {
                debug!(fallback = %fallback, "API URL not configured, using fallback");
                fallback.trim().to_string()
            }
            (None, MissingUrlPolicy::FailFast) => return Err(ConfigError::MissingBaseUrl),
        };

        let mut base_url = chosen.trim_end_matches('/').to_string();
        if environment.is_production() {
            // Schemes are case-insensitive
            let insecure = base_url
                .get(..7)
                .is_some_and(|scheme| scheme.eq_ignore_ascii_case("http://"));
            if insecure {
                warn!(url = %base_url, "Upgrading API URL to https in production");
                base_url = format!("https://{}", &base_url[7..]);
            }
        }

        validate(&base_url)?;
        debug!(base_url = %base_url, %environment, "Resolved API base URL");

        Ok(Self {
            base_url,
            environment,
        })
    }

    /// Load configuration from the process environment
    ///
    /// Reads `NEXT_PUBLIC_API_URL` and `NODE_ENV` (or `APP_ENV`).
    ///
    /// # Errors
    ///
    /// Returns an error if the environment cannot be read or the URL does not
    /// resolve under `policy`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env(policy: &MissingUrlPolicy) -> Result<Self, ConfigError> {
        Self::load(config::Environment::default(), policy)
    }

    /// Load configuration from an explicit variable map instead of the process
    /// environment
    ///
    /// # Errors
    ///
    /// Same as [`ApiConfig::from_env`]
    pub fn from_source(
        vars: config::Map<String, String>,
        policy: &MissingUrlPolicy,
    ) -> Result<Self, ConfigError> {
        Self::load(config::Environment::default().source(Some(vars)), policy)
    }

    fn load(source: config::Environment, policy: &MissingUrlPolicy) -> Result<Self, ConfigError> {
        let settings: EnvSettings = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        let environment: Environment = settings
            .node_env
            .or(settings.app_env)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        Self::resolve(settings.next_public_api_url.as_deref(), environment, policy)
    }

    /// Get the base URL, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the execution environment
    pub fn environment(&self) -> Environment {
        self.environment
    }
}

fn is_loopback(url: &str) -> bool {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_ascii_lowercase))
        .is_some_and(|host| matches!(host.as_str(), "localhost" | "127.0.0.1" | "[::1]"))
}

fn validate(base_url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = url::Url::parse(base_url).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    Ok(())
}

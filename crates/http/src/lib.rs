//! HTTP client for the to-do API
//!
//! Resolves the API base URL once at startup, builds a reusable client with
//! JSON defaults, attaches the stored session token to every request, and on
//! HTTP 401 clears the token and sends the user to the login route.
//!
//! Browser globals are never touched directly. Storage and navigation are
//! injected through [`CredentialStore`] and [`Navigator`].

pub mod client;

pub use client::auth::{AuthResponse, AuthService, SignInRequest, SignUpRequest, User};
pub use client::config::{ApiConfig, Environment, MissingUrlPolicy};
pub use client::error::{ClientError, ConfigError};
pub use client::interceptor::{
    BearerAuth, LogoutOnUnauthorized, RequestInterceptor, ResponseInterceptor,
};
pub use client::session::{
    CredentialStore, LOGIN_ROUTE, MemoryCredentialStore, Navigator, NullCredentialStore,
    NullNavigator, RecordingNavigator, TOKEN_STORAGE_KEY,
};
pub use client::{ApiClient, ApiClientBuilder};

// Re-exported so callers can build requests without depending on reqwest
pub use reqwest::{Method, Response, StatusCode};

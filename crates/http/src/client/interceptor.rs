//! Request and response interceptors

use super::error::ClientError;
use super::session::{CredentialStore, LOGIN_ROUTE, Navigator};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Request, StatusCode};
use std::sync::Arc;
use tracing::{debug, warn};

/// Hook run on every outgoing request, after it is built and before it is sent
pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, request: &mut Request) -> Result<(), ClientError>;
}

/// Hook run on every response status before the body is read
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, status: StatusCode);
}

/// Attaches the stored session token as a bearer credential
pub struct BearerAuth {
    store: Arc<dyn CredentialStore>,
}

impl BearerAuth {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

impl RequestInterceptor for BearerAuth {
    fn on_request(&self, request: &mut Request) -> Result<(), ClientError> {
        let Some(token) = self.store.get_token().filter(|t| !t.is_empty()) else {
            return Ok(());
        };

        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            // An unusable token must not fail the request
            Err(_) => warn!("Stored token is not a valid header value, sending request without it"),
        }
        Ok(())
    }
}

/// Clears the session and sends the user to the login route on HTTP 401
pub struct LogoutOnUnauthorized {
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    login_route: String,
}

impl LogoutOnUnauthorized {
    pub fn new(store: Arc<dyn CredentialStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            navigator,
            login_route: LOGIN_ROUTE.to_string(),
        }
    }

    /// Redirect somewhere other than `/login`
    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }
}

impl ResponseInterceptor for LogoutOnUnauthorized {
    fn on_response(&self, status: StatusCode) {
        if status != StatusCode::UNAUTHORIZED {
            return;
        }

        warn!(route = %self.login_route, "Session rejected, clearing token");
        if let Err(e) = self.store.remove_token() {
            warn!("Failed to clear stored token: {e}");
        }
        debug!("Redirecting to {}", self.login_route);
        self.navigator.navigate(&self.login_route);
    }
}

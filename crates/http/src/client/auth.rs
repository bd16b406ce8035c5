//! Authentication API client methods
//!
//! Sign-up, sign-in and session lookup are delegated to the remote API. The
//! only local state is the token kept in the client's credential store.

use super::{ApiClient, ClientError};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const SIGNUP_PATH: &str = "/api/auth/signup";
pub const SIGNIN_PATH: &str = "/api/auth/signin";
pub const SESSION_PATH: &str = "/api/auth/me";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Authenticated user as reported by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Token issued by the API on sign-up or sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub user: Option<User>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Authentication service backed by the remote API
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Get the underlying API client
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Register a new account and keep the issued token
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthResponse, ClientError> {
        let req = self.client.request(Method::POST, SIGNUP_PATH).json(request);
        let response: AuthResponse = self.client.execute(req).await?;
        self.store_token(&response)?;
        info!(email = %request.email, "Signed up");
        Ok(response)
    }

    /// Sign in and keep the issued token
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<AuthResponse, ClientError> {
        let req = self.client.request(Method::POST, SIGNIN_PATH).json(request);
        let response: AuthResponse = self.client.execute(req).await?;
        self.store_token(&response)?;
        info!(email = %request.email, "Signed in");
        Ok(response)
    }

    /// Forget the local session. The API is not contacted.
    pub fn sign_out(&self) -> Result<(), ClientError> {
        self.client.credentials().remove_token()?;
        info!("Signed out");
        Ok(())
    }

    /// Whether a session token is currently stored
    pub fn is_authenticated(&self) -> bool {
        self.client
            .credentials()
            .get_token()
            .is_some_and(|token| !token.is_empty())
    }

    /// Look up the current user
    ///
    /// Returns `Ok(None)` when there is no token, or when the API rejects it.
    /// In the latter case the token has already been cleared by the client.
    pub async fn session(&self) -> Result<Option<User>, ClientError> {
        if !self.is_authenticated() {
            debug!("No stored token, skipping session lookup");
            return Ok(None);
        }

        match self.client.get::<User>(SESSION_PATH).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_unauthorized() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn store_token(&self, response: &AuthResponse) -> Result<(), ClientError> {
        if response.access_token.is_empty() {
            return Err(ClientError::Unauthorized(
                "API returned an empty access token".into(),
            ));
        }
        self.client.credentials().set_token(&response.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_defaults() {
        let response: AuthResponse =
            serde_json::from_str(r#"{"access_token": "abc123"}"#).unwrap();
        assert_eq!(response.token_type, "bearer");
        assert!(response.user.is_none());
    }

    #[test]
    fn test_sign_up_omits_missing_name() {
        let body = serde_json::to_value(SignUpRequest {
            email: "ada@example.com".into(),
            password: "hunter22".into(),
            name: None,
        })
        .unwrap();
        assert!(body.get("name").is_none());
    }
}

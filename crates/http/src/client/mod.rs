//! To-do API HTTP client

pub mod auth;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod session;

use config::ApiConfig;
use error::ClientError;
use interceptor::{BearerAuth, LogoutOnUnauthorized, RequestInterceptor, ResponseInterceptor};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use session::{CredentialStore, LOGIN_ROUTE, Navigator, NullCredentialStore, NullNavigator};
use std::sync::Arc;
use tracing::debug;

/// HTTP client bound to the to-do API base URL
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
    credentials: Arc<dyn CredentialStore>,
    request_interceptors: Arc<[Arc<dyn RequestInterceptor>]>,
    response_interceptors: Arc<[Arc<dyn ResponseInterceptor>]>,
}

impl ApiClient {
    /// Create a client with no persistent storage and no navigation
    pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
        Self::builder().config(config).build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Get the resolved configuration
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Get the credential store the client reads tokens from
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Create a request builder for `path`, resolved against the base URL
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = if path.starts_with('/') {
            format!("{}{}", self.base_url(), path)
        } else {
            format!("{}/{}", self.base_url(), path)
        };
        self.client.request(method, url)
    }

    /// Send a request through the interceptors
    ///
    /// Any non-2xx status is returned as an error, after the response
    /// interceptors have seen it.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let mut request = request.build()?;
        for interceptor in self.request_interceptors.iter() {
            interceptor.on_request(&mut request)?;
        }

        debug!(method = %request.method(), url = %request.url(), "Sending request");
        let response = self.client.execute(request).await?;
        let status = response.status();

        for interceptor in self.response_interceptors.iter() {
            interceptor.on_response(status);
        }

        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }

    /// Execute a request and decode the JSON body
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Execute a request and discard the body
    pub async fn execute_empty(&self, request: RequestBuilder) -> Result<(), ClientError> {
        self.send(request).await.map(drop)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::GET, path)).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.execute(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.execute(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.execute(self.request(Method::PATCH, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.execute_empty(self.request(Method::DELETE, path)).await
    }
}

/// Builder for ApiClient
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiConfig>,
    credentials: Option<Arc<dyn CredentialStore>>,
    navigator: Option<Arc<dyn Navigator>>,
    login_route: Option<String>,
    user_agent: Option<String>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl ApiClientBuilder {
    /// Set the resolved API configuration
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set where the session token is read from and cleared
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    /// Set how the user is sent to the login route
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Override the route visited after a 401
    pub fn login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = Some(route.into());
        self
    }

    /// Set the user agent (ignored in the browser)
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Add a request interceptor, run after the bearer token is attached
    pub fn request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    /// Add a response interceptor, run after the 401 logout check
    pub fn response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let config = self
            .config
            .ok_or(ClientError::Configuration(error::ConfigError::MissingBaseUrl))?;

        let credentials = self
            .credentials
            .unwrap_or_else(|| Arc::new(NullCredentialStore));
        let navigator = self.navigator.unwrap_or_else(|| Arc::new(NullNavigator));
        let login_route = self.login_route.unwrap_or_else(|| LOGIN_ROUTE.to_string());

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut client_builder = ClientBuilder::new().default_headers(default_headers);

        #[cfg(not(target_arch = "wasm32"))]
        {
            let user_agent = self
                .user_agent
                .unwrap_or_else(|| format!("todo-client/{}", env!("CARGO_PKG_VERSION")));
            client_builder = client_builder.user_agent(user_agent);
        }

        #[cfg(target_arch = "wasm32")]
        let _ = self.user_agent; // Browsers set their own user agent

        let client = client_builder.build()?;

        let mut request_interceptors: Vec<Arc<dyn RequestInterceptor>> =
            vec![Arc::new(BearerAuth::new(credentials.clone()))];
        request_interceptors.extend(self.request_interceptors);

        let mut response_interceptors: Vec<Arc<dyn ResponseInterceptor>> = vec![Arc::new(
            LogoutOnUnauthorized::new(credentials.clone(), navigator).with_login_route(login_route),
        )];
        response_interceptors.extend(self.response_interceptors);

        debug!(base_url = %config.base_url(), "Built API client");

        Ok(ApiClient {
            client,
            config,
            credentials,
            request_interceptors: request_interceptors.into(),
            response_interceptors: response_interceptors.into(),
        })
    }
}

//! CLI commands

use anyhow::{Context as _, Result, bail};
use clap::Subcommand;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use todo_http::{
    ApiClient, ApiConfig, AuthService, Environment, Method, MissingUrlPolicy, SignInRequest,
    SignUpRequest,
};
use tracing::info;

use crate::session::{FileCredentialStore, HintNavigator};

/// API used in development when no URL is configured
pub const DEV_API_URL: &str = "http://localhost:8000";

#[derive(Subcommand)]
pub enum Commands {
    /// Show the resolved API configuration
    Config,

    /// Sign in and save the session token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "TODO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and save the session token
    Signup {
        #[arg(long)]
        email: String,

        #[arg(long, env = "TODO_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        name: Option<String>,
    },

    /// Forget the saved session token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Send an authenticated request and print the JSON response
    Request {
        /// HTTP method
        method: String,

        /// Path relative to the API base URL
        path: String,

        /// JSON request body
        #[arg(long)]
        data: Option<String>,
    },
}

/// Global options shared by every command
pub struct Context {
    pub data_dir: Option<PathBuf>,
    pub api_url: Option<String>,
    pub environment: Environment,
}

impl Context {
    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("todo")
        })
    }

    /// Resolve the API configuration. Development falls back to a local API,
    /// production refuses to start without an explicit URL.
    fn api_config(&self) -> Result<ApiConfig> {
        let policy = if self.environment.is_production() {
            MissingUrlPolicy::FailFast
        } else {
            MissingUrlPolicy::Fallback(DEV_API_URL.to_string())
        };
        Ok(ApiConfig::resolve(self.api_url.as_deref(), self.environment, &policy)?)
    }

    fn client(&self) -> Result<ApiClient> {
        let store = FileCredentialStore::new(&self.data_dir());
        Ok(ApiClient::builder()
            .config(self.api_config()?)
            .credential_store(Arc::new(store))
            .navigator(Arc::new(HintNavigator))
            .build()?)
    }
}

impl Commands {
    pub async fn execute(self, context: Context) -> Result<()> {
        match self {
            Commands::Config => show_config(&context),
            Commands::Login { email, password } => {
                let auth = AuthService::new(context.client()?);
                let response = auth.sign_in(&SignInRequest { email, password }).await?;
                print_signed_in(response.user.as_ref().map(|u| u.email.as_str()));
                Ok(())
            }
            Commands::Signup {
                email,
                password,
                name,
            } => {
                let auth = AuthService::new(context.client()?);
                let response = auth
                    .sign_up(&SignUpRequest {
                        email,
                        password,
                        name,
                    })
                    .await?;
                print_signed_in(response.user.as_ref().map(|u| u.email.as_str()));
                Ok(())
            }
            Commands::Logout => {
                AuthService::new(context.client()?).sign_out()?;
                println!("Signed out");
                Ok(())
            }
            Commands::Whoami => {
                let auth = AuthService::new(context.client()?);
                match auth.session().await? {
                    Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
                    None => bail!("not signed in"),
                }
                Ok(())
            }
            Commands::Request { method, path, data } => {
                send_request(&context.client()?, &method, &path, data.as_deref()).await
            }
        }
    }
}

fn show_config(context: &Context) -> Result<()> {
    let config = context.api_config()?;
    println!("API URL:     {}", config.base_url());
    println!("Environment: {}", config.environment());
    println!(
        "Token file:  {}",
        FileCredentialStore::new(&context.data_dir()).path().display()
    );
    Ok(())
}

fn print_signed_in(email: Option<&str>) {
    match email {
        Some(email) => println!("Signed in as {email}"),
        None => println!("Signed in"),
    }
}

async fn send_request(
    client: &ApiClient,
    method: &str,
    path: &str,
    data: Option<&str>,
) -> Result<()> {
    let method: Method = method
        .to_ascii_uppercase()
        .parse()
        .with_context(|| format!("invalid HTTP method: {method}"))?;

    let mut request = client.request(method, path);
    if let Some(data) = data {
        let body: Value = serde_json::from_str(data).context("--data must be valid JSON")?;
        request = request.json(&body);
    }

    info!("Sending request to {path}");
    let response = client.send(request).await?;
    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(());
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{body}"),
    }
    Ok(())
}

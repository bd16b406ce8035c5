//! Todo CLI - command-line client for the to-do API

mod commands;
mod logging;
mod session;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::{Commands, Context};
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Command-line client for the to-do API")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Directory holding the session token
    #[arg(short = 'd', long, global = true, env = "TODO_STATE_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Base URL of the to-do API
    #[arg(long, global = true, env = "NEXT_PUBLIC_API_URL")]
    api_url: Option<String>,

    /// Execution environment (production upgrades the API URL to https)
    #[arg(long = "env", global = true, env = "NODE_ENV", default_value = "development")]
    environment: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.into())?;
    debug!("Starting todo CLI");

    let context = Context {
        data_dir: cli.data_dir,
        api_url: cli.api_url,
        environment: cli.environment.parse()?,
    };

    if let Err(e) = cli.command.execute(context).await {
        error!("Command failed: {e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

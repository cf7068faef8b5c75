//! Entry point for the stdio lookup service.

use std::path::PathBuf;
use std::process::ExitCode;

use otp_locale::bundle::BundleError;
use otp_locale::config::{
    ConfigError,
    ConfigManager,
};
use otp_locale::locale;
use otp_locale::service::serve;
use thiserror::Error;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error("I/O error while serving lookups: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let start = std::env::args_os().nth(1).map(PathBuf::from).or_else(|| std::env::current_dir().ok());

    match run(start).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(start: Option<PathBuf>) -> Result<(), AppError> {
    let config = ConfigManager::load(start.as_deref())?;
    let bundle = locale::bundle(config.language())?;

    tracing::info!(
        language = %config.language(),
        separator = %config.key_separator(),
        settings = ?config.source(),
        "Serving lookups on stdin"
    );

    let (stdin, stdout) = (tokio::io::stdin(), tokio::io::stdout());
    serve(BufReader::new(stdin), stdout, bundle, config.key_separator()).await?;

    Ok(())
}

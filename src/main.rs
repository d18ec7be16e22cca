use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use image_batch_lib::{Credential, StartupError, API_KEY_ENV, API_KEY_HELP_URL};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenvy::dotenv(); // Load .env from current directory

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let root = std::env::current_dir().context("Failed to resolve working directory")?;

    match image_batch_lib::run(Credential::from_env(), &root).await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(StartupError::MissingCredential(_)) => {
            eprintln!("Error: {} environment variable not set", API_KEY_ENV);
            eprintln!("Get your API key from: {}", API_KEY_HELP_URL);
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err).context("Image generation could not start"),
    }
}

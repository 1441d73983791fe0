//! # Quill CLI
//!
//! Seeds the data API, searches posts and previews formatted text.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Results go to stdout, logs to stderr.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    commands::run(cli).await
}

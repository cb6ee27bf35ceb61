//! Binary crate for the `weather-recap` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Loading `.env` and initializing logging
//! - Orchestrating fetch -> extract -> send

use clap::Parser;
use std::path::Path;

mod cli;

/// Load .env: workspace root first, then cwd as fallback.
fn load_dotenv() {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    if let Some(parent) = Path::new(manifest_dir).parent() {
        let env_path = parent.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        }
    }
    dotenvy::dotenv().ok();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}

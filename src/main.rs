//! Example binary demonstrating the acloud_client library.
//!
//! Lists every cluster the configured token can see, across all
//! organisations, and prints them as JSON.
//!
//! ## Usage
//!
//! 1. Create a `.env` file with at least `ACLOUD_PAT`
//! 2. Run: `cargo run`
//! 3. Set `RUST_LOG=acloud_client=debug` to trace page fetches

#![allow(clippy::print_stdout)] // Allow println! in the binary example

use acloud_client::{AcloudClient, AcloudClientConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Load configuration from environment
    let cfg = AcloudClientConfig::from_env()?;
    tracing::info!(api_url = %cfg.api_url, "configuration loaded");

    let client = AcloudClient::new(cfg)?;

    // Fan out over every organisation membership
    let clusters = client.get_clusters(&[]).await?;
    tracing::info!(clusters = clusters.len(), "clusters listed");

    println!("{}", serde_json::to_string_pretty(&clusters)?);

    Ok(())
}

use anyhow::Result;
use std::path::PathBuf;
use tracing::Level;

use libris_server::Server;
use libris_storage_sled::SledStorageEngine;

#[tokio::main]
async fn main() -> Result<()> {
    // initialize tracing
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    // Initialize storage engine
    let storage = match std::env::var("LIBRIS_DATA_DIR") {
        Ok(dir) => SledStorageEngine::with_path(PathBuf::from(dir))?,
        Err(_) => SledStorageEngine::new()?,
    };

    let port: u16 = std::env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(5000);

    let server = Server::builder()
        .bind_address(format!("0.0.0.0:{}", port))
        .with_storage(storage)
        .build()
        .await?;

    server.run().await?;

    Ok(())
}

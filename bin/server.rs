// SWIFT Code Directory - Web Server

use anyhow::{Context, Result};
use swift_directory::server::{build_router, AppState};
use swift_directory::{import_csv, Config, DirectoryService, SqliteStore};

#[tokio::main]
async fn main() -> Result<()> {
    swift_directory::init_tracing();

    let config = Config::from_env()?;

    let store = SqliteStore::open(&config.database_path)
        .with_context(|| format!("Failed to open {}", config.database_path.display()))?;
    tracing::info!(path = %config.database_path.display(), "database opened");

    // One-time bulk import; a no-op once the store holds data.
    // A failed import is logged and the directory still serves what it has.
    if let Some(csv_path) = &config.import_csv {
        match import_csv(&store, csv_path) {
            Ok(report) => tracing::info!(?report, "startup import done"),
            Err(e) => tracing::error!(path = %csv_path.display(), "startup import failed: {:#}", e),
        }
    }

    let app = build_router(AppState::new(DirectoryService::new(store)));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    tracing::info!("SWIFT directory listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .context("Server terminated")?;

    Ok(())
}

#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use paybook::config;
use paybook::errors::Result;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Open the database and make sure the schema exists
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to initialize schema: {}", e))?;

    // 4. Seed the roster from config.toml if one is present
    if Path::new("config.toml").exists() {
        let roster = config::employees::load_default_config()
            .inspect_err(|e| error!("Failed to load config.toml: {}", e))?;
        let created = config::employees::seed_initial_employees(&db, &roster).await?;
        info!("Roster seeded: {} new employee(s).", created);
    } else {
        warn!("No config.toml found; starting with the existing roster only.");
    }

    info!("Paybook ready.");
    Ok(())
}

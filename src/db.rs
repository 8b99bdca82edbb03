use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::store::{MemoryStore, MySqlStore, RecordStore};

const MEMORY_SCHEME: &str = "memory://";

/// Opens the process-wide store selected by `DATABASE_URL` and makes sure the
/// schema and its unique keys exist. Callers own the returned handle and must
/// [`close`](RecordStore::close) it once on shutdown.
pub async fn init_db(config: &Config) -> Result<Arc<dyn RecordStore>> {
    if config.database_url.starts_with(MEMORY_SCHEME) {
        warn!("Using in-memory store, data is lost on restart");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = MySqlStore::connect(
        &config.database_url,
        &config.database_name,
        config.db_max_connections,
    )
    .await
    .context("Failed to connect to database")?;

    store
        .ensure_schema()
        .await
        .context("Failed to create database schema")?;

    info!(database = %config.database_name, "Record store ready");
    Ok(Arc::new(store))
}

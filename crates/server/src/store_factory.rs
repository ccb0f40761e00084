use std::sync::Arc;

use tracing::info;

use docshelf_store::DocumentStore;
use docshelf_store_memory::MemoryDocumentStore;
use docshelf_store_postgres::{PostgresConfig, PostgresDocumentStore};

use crate::config::StoreConfig;
use crate::error::ServerError;

/// Build a [`PostgresConfig`] from the TOML store section, filling in the
/// backend defaults for anything left unset.
pub fn postgres_config(config: &StoreConfig) -> PostgresConfig {
    let mut pg = PostgresConfig::default();
    if let Some(ref url) = config.url {
        pg.url = url.clone();
    }
    if let Some(pool_size) = config.pool_size {
        pg.pool_size = pool_size;
    }
    if let Some(ref schema) = config.schema {
        pg.schema = schema.clone();
    }
    if let Some(ref table_prefix) = config.table_prefix {
        pg.table_prefix = table_prefix.clone();
    }
    pg.ssl_mode = config.ssl_mode.clone();
    pg.ssl_root_cert = config.ssl_root_cert.clone();
    pg.ssl_cert = config.ssl_cert.clone();
    pg.ssl_key = config.ssl_key.clone();
    pg
}

/// Create the configured document store backend.
///
/// The Postgres backend connects and runs migrations before returning.
///
/// # Errors
///
/// Returns [`ServerError::Config`] for an unknown backend name and
/// [`ServerError::Store`] when the Postgres backend fails to initialize.
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, ServerError> {
    match config.backend.as_str() {
        "memory" => Ok(Arc::new(MemoryDocumentStore::new())),
        "postgres" => {
            let pg = postgres_config(config);
            info!(url = %pg.url, schema = %pg.schema, "connecting to postgres store");
            let store = PostgresDocumentStore::new(pg).await?;
            Ok(Arc::new(store))
        }
        other => Err(ServerError::Config(format!(
            "unknown store backend: {other} (expected 'memory' or 'postgres')"
        ))),
    }
}

//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryInvoiceStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresInvoiceStore;

use crate::config::{DatabaseConfig, StorageBackend};
use crate::core::error::{ConfigError, TrackerResult};
use crate::core::store::InvoiceStore;
use std::sync::Arc;

/// Open the store named by `database`.
///
/// For postgres this connects and, if `run_migrations` is set, applies the
/// bundled migrations. A postgres backend without a url, or in a build
/// without the `postgres` feature, is a [`ConfigError`].
pub async fn open(database: &DatabaseConfig) -> TrackerResult<Arc<dyn InvoiceStore>> {
    match database.backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryInvoiceStore::new())),
        StorageBackend::Postgres => {
            let url = database
                .url
                .as_deref()
                .ok_or_else(|| ConfigError::InvalidValue {
                    field: "database.url".to_string(),
                    value: String::new(),
                    message: "the postgres backend needs a connection url".to_string(),
                })?;
            open_postgres(url, database).await
        }
    }
}

#[cfg(feature = "postgres")]
async fn open_postgres(url: &str, database: &DatabaseConfig) -> TrackerResult<Arc<dyn InvoiceStore>> {
    let store = PostgresInvoiceStore::connect(url, database.max_connections).await?;
    if database.run_migrations {
        store.migrate().await?;
        tracing::info!("migrations applied");
    }
    Ok(Arc::new(store))
}

#[cfg(not(feature = "postgres"))]
async fn open_postgres(_url: &str, _database: &DatabaseConfig) -> TrackerResult<Arc<dyn InvoiceStore>> {
    Err(ConfigError::InvalidValue {
        field: "database.backend".to_string(),
        value: "postgres".to_string(),
        message: "this build has no postgres support; rebuild with `--features postgres`"
            .to_string(),
    }
    .into())
}

// # Contact Store Implementations
//
// This module provides implementations of the ContactStore trait and the
// factory that picks one from configuration.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryContactStore;
pub use sqlite::SqliteContactStore;

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::traits::ContactStore;

/// Build the store described by `config`
///
/// # Errors
///
/// Fails if the SQLite file cannot be opened or created.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn ContactStore>> {
    config.validate()?;

    let store: Arc<dyn ContactStore> = match config {
        StoreConfig::Sqlite { path } => Arc::new(SqliteContactStore::open(path).await?),
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory contact store; contacts will not survive a restart");
            Arc::new(MemoryContactStore::new())
        }
    };

    Ok(store)
}

//! Registry Store Backends
//!
//! Implementations of [`RegistryStore`](crate::domain::RegistryStore).

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::domain::ports::RegistryStoreRef;
use crate::error::Result;
use std::sync::Arc;

/// Selectable store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StoreBackend {
    /// Transient in-memory SQLite database
    #[default]
    Sqlite,
    /// Plain in-process tables
    Memory,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Sqlite => write!(f, "sqlite"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Open a fresh, empty store for the given backend
pub fn open(backend: StoreBackend) -> Result<RegistryStoreRef> {
    let store: RegistryStoreRef = match backend {
        StoreBackend::Sqlite => Arc::new(SqliteStore::open_in_memory()?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}

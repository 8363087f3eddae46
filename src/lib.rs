//! Command Relay - Client Registry and Join-Room Command Log
//!
//! Tracks registered clients (each identified by a generated access key) and
//! an append-only log of join-room directives, exposed over HTTP/JSON.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              REST API (axum)                 │
//! │  /addclient /clients /removeclient           │
//! │  /joinroom  /commands                        │
//! └──────────────────────┬───────────────────────┘
//!                        │
//!            ┌───────────┴───────────┐
//!            │   Registry Service    │
//!            │ (validation, keys)    │
//!            └───────────┬───────────┘
//!                        │ RegistryStore
//!          ┌─────────────┴─────────────┐
//!          │                           │
//!  ┌───────┴────────┐        ┌─────────┴───────┐
//!  │  SqliteStore   │        │   MemoryStore   │
//!  │ (in-memory db) │        │ (plain tables)  │
//!  └────────────────┘        └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: REST handlers and the HTTP server
//! - [`registry`]: Registry service and client key generation
//! - [`store`]: Store backends
//! - [`domain`]: Records and the storage trait
//! - [`error`]: Error types and handling

pub mod api;
pub mod domain;
pub mod error;
pub mod registry;
pub mod store;

// Re-export commonly used types
pub use api::{ApiServer, ApiServerConfig, RestRouter};

pub use domain::ports::{
    Client, Command, NewCommand, RegistryStore, RegistryStoreRef, RemovalOutcome, RowId,
};

pub use error::{Error, Result};

pub use registry::{generate_key, RegistryService, KEY_ALPHABET, KEY_LENGTH};

pub use store::{MemoryStore, SqliteStore, StoreBackend};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Domain Ports - Core records and the storage trait
//!
//! The registry service talks to storage only through [`RegistryStore`].
//! Adapters in [`crate::store`] implement it.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Row identifier assigned by the store
pub type RowId = i64;

/// The only command tag this system produces
pub const JOIN_ROOM: &str = "joinroom";

// =============================================================================
// Records
// =============================================================================

/// A registered client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: RowId,
    pub key: String,
}

/// An entry in the command log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub id: RowId,
    /// Directive tag, free-form at the storage level
    pub command: String,
    pub target: String,
    #[serde(rename = "clientKey")]
    pub client_key: Option<String>,
    pub room: String,
}

/// A command that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommand {
    pub command: String,
    pub target: String,
    pub client_key: Option<String>,
    pub room: String,
}

impl NewCommand {
    /// Build a join-room directive
    pub fn join_room(
        room: impl Into<String>,
        target: impl Into<String>,
        client_key: Option<String>,
    ) -> Self {
        Self {
            command: JOIN_ROOM.to_string(),
            target: target.into(),
            client_key,
            room: room.into(),
        }
    }
}

/// Row counts affected by a client removal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovalOutcome {
    /// Commands deleted by the cascade
    pub commands_removed: u64,
    /// Client rows deleted
    pub clients_removed: u64,
}

// =============================================================================
// RegistryStore Trait
// =============================================================================

/// Relational storage for clients and commands
///
/// Ids are assigned monotonically and never reused within a store.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Insert a client row and return its id
    async fn insert_client(&self, key: &str) -> Result<RowId>;

    /// All clients in insertion order
    async fn list_clients(&self) -> Result<Vec<Client>>;

    /// Delete commands whose `clientKey` matches, then clients whose `key`
    /// matches. Both deletes commit together.
    async fn remove_client(&self, key: &str) -> Result<RemovalOutcome>;

    /// Append a command and return its id
    async fn insert_command(&self, command: NewCommand) -> Result<RowId>;

    /// The command with the highest id, if any
    async fn latest_command(&self) -> Result<Option<Command>>;

    /// Short backend name for logging
    fn backend(&self) -> &'static str;
}

pub type RegistryStoreRef = Arc<dyn RegistryStore>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serializes_client_key_camel_case() {
        let command = Command {
            id: 1,
            command: JOIN_ROOM.into(),
            target: "peerA".into(),
            client_key: None,
            room: "lobby".into(),
        };

        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "command": "joinroom",
                "target": "peerA",
                "clientKey": null,
                "room": "lobby"
            })
        );
    }

    #[test]
    fn test_join_room_tag() {
        let command = NewCommand::join_room("lobby", "peerA", Some("KEY".into()));
        assert_eq!(command.command, "joinroom");
        assert_eq!(command.client_key.as_deref(), Some("KEY"));
    }
}

//! In-Memory Store
//!
//! Plain in-process tables with the same semantics as the SQLite store.

use crate::domain::ports::{Client, Command, NewCommand, RegistryStore, RemovalOutcome, RowId};
use crate::error::Result;
use async_trait::async_trait;
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct Tables {
    clients: Vec<Client>,
    commands: Vec<Command>,
    /// Last id handed out per table; never decreases
    last_client_id: RowId,
    last_command_id: RowId,
}

// =============================================================================
// Memory Store
// =============================================================================

/// Registry store keeping both tables in vectors
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored commands
    pub fn command_count(&self) -> usize {
        self.tables.read().commands.len()
    }
}

#[async_trait]
impl RegistryStore for MemoryStore {
    async fn insert_client(&self, key: &str) -> Result<RowId> {
        let mut tables = self.tables.write();
        tables.last_client_id += 1;
        let id = tables.last_client_id;
        tables.clients.push(Client {
            id,
            key: key.to_string(),
        });
        Ok(id)
    }

    async fn list_clients(&self) -> Result<Vec<Client>> {
        Ok(self.tables.read().clients.clone())
    }

    async fn remove_client(&self, key: &str) -> Result<RemovalOutcome> {
        // One write guard covers both deletes
        let mut tables = self.tables.write();

        let commands_before = tables.commands.len();
        tables
            .commands
            .retain(|c| c.client_key.as_deref() != Some(key));
        let clients_before = tables.clients.len();
        tables.clients.retain(|c| c.key != key);

        Ok(RemovalOutcome {
            commands_removed: (commands_before - tables.commands.len()) as u64,
            clients_removed: (clients_before - tables.clients.len()) as u64,
        })
    }

    async fn insert_command(&self, command: NewCommand) -> Result<RowId> {
        let mut tables = self.tables.write();
        tables.last_command_id += 1;
        let id = tables.last_command_id;
        tables.commands.push(Command {
            id,
            command: command.command,
            target: command.target,
            client_key: command.client_key,
            room: command.room,
        });
        Ok(id)
    }

    async fn latest_command(&self) -> Result<Option<Command>> {
        Ok(self.tables.read().commands.last().cloned())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let store = MemoryStore::new();
        assert_eq!(store.insert_client("A").await.unwrap(), 1);
        assert_eq!(store.insert_client("B").await.unwrap(), 2);

        store.remove_client("B").await.unwrap();
        assert_eq!(store.insert_client("C").await.unwrap(), 3);

        let ids: Vec<_> = store
            .list_clients()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_remove_client_cascades() {
        let store = MemoryStore::new();
        store.insert_client("K1").await.unwrap();
        store
            .insert_command(NewCommand::join_room("r1", "t1", None))
            .await
            .unwrap();
        store
            .insert_command(NewCommand::join_room("r2", "t2", Some("K1".into())))
            .await
            .unwrap();

        let outcome = store.remove_client("K1").await.unwrap();
        assert_eq!(outcome.commands_removed, 1);
        assert_eq!(outcome.clients_removed, 1);
        assert_eq!(store.command_count(), 1);

        let latest = store.latest_command().await.unwrap().unwrap();
        assert_eq!(latest.id, 1);
        assert_eq!(latest.client_key, None);
    }

    #[tokio::test]
    async fn test_latest_command_empty() {
        let store = MemoryStore::new();
        assert!(store.latest_command().await.unwrap().is_none());
    }
}

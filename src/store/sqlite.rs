//! SQLite Store
//!
//! In-memory SQLite database holding the `clients` and `commands` tables.
//! A single connection is shared behind a mutex, so statements from
//! concurrent requests run one at a time.

use crate::domain::ports::{Client, Command, NewCommand, RegistryStore, RemovalOutcome, RowId};
use crate::error::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

const SCHEMA: &str = "
    CREATE TABLE clients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        key TEXT
    );
    CREATE TABLE commands (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        command TEXT,
        target TEXT,
        clientKey TEXT,
        room TEXT
    );
";

// =============================================================================
// SQLite Store
// =============================================================================

/// Registry store backed by a transient in-memory SQLite database
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a fresh in-memory database with empty tables
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        debug!("SQLite schema created");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn command_from_row(row: &Row<'_>) -> rusqlite::Result<Command> {
        Ok(Command {
            id: row.get(0)?,
            command: row.get(1)?,
            target: row.get(2)?,
            client_key: row.get(3)?,
            room: row.get(4)?,
        })
    }
}

#[async_trait]
impl RegistryStore for SqliteStore {
    async fn insert_client(&self, key: &str) -> Result<RowId> {
        let conn = self.conn.lock();
        conn.execute("INSERT INTO clients (key) VALUES (?1)", params![key])?;
        Ok(conn.last_insert_rowid())
    }

    async fn list_clients(&self) -> Result<Vec<Client>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT id, key FROM clients ORDER BY id")?;
        let clients = stmt
            .query_map([], |row| {
                Ok(Client {
                    id: row.get(0)?,
                    key: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(clients)
    }

    async fn remove_client(&self, key: &str) -> Result<RemovalOutcome> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        let commands_removed = tx.execute("DELETE FROM commands WHERE clientKey = ?1", params![key])?;
        let clients_removed = tx.execute("DELETE FROM clients WHERE key = ?1", params![key])?;

        tx.commit()?;

        Ok(RemovalOutcome {
            commands_removed: commands_removed as u64,
            clients_removed: clients_removed as u64,
        })
    }

    async fn insert_command(&self, command: NewCommand) -> Result<RowId> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO commands (command, target, clientKey, room) VALUES (?1, ?2, ?3, ?4)",
            params![command.command, command.target, command.client_key, command.room],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn latest_command(&self) -> Result<Option<Command>> {
        let conn = self.conn.lock();
        let command = conn
            .query_row(
                "SELECT id, command, target, clientKey, room FROM commands ORDER BY id DESC LIMIT 1",
                [],
                Self::command_from_row,
            )
            .optional()?;

        Ok(command)
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_list_clients() {
        let store = store();
        assert!(store.list_clients().await.unwrap().is_empty());

        let first = store.insert_client("AAAAAAAAAAAAAAAA").await.unwrap();
        let second = store.insert_client("BBBBBBBBBBBBBBBB").await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let clients = store.list_clients().await.unwrap();
        assert_eq!(
            clients,
            vec![
                Client { id: 1, key: "AAAAAAAAAAAAAAAA".into() },
                Client { id: 2, key: "BBBBBBBBBBBBBBBB".into() },
            ]
        );
    }

    #[tokio::test]
    async fn test_latest_command() {
        let store = store();
        assert_eq!(store.latest_command().await.unwrap(), None);

        store
            .insert_command(NewCommand::join_room("lobby", "peerA", None))
            .await
            .unwrap();
        let id = store
            .insert_command(NewCommand::join_room("stage", "peerB", Some("KEY".into())))
            .await
            .unwrap();
        assert_eq!(id, 2);

        let latest = store.latest_command().await.unwrap().unwrap();
        assert_eq!(
            latest,
            Command {
                id: 2,
                command: "joinroom".into(),
                target: "peerB".into(),
                client_key: Some("KEY".into()),
                room: "stage".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_remove_client_cascades() {
        let store = store();
        store.insert_client("KEEP").await.unwrap();
        store.insert_client("DROP").await.unwrap();

        store
            .insert_command(NewCommand::join_room("a", "t1", Some("KEEP".into())))
            .await
            .unwrap();
        store
            .insert_command(NewCommand::join_room("b", "t2", Some("DROP".into())))
            .await
            .unwrap();
        store
            .insert_command(NewCommand::join_room("c", "t3", Some("DROP".into())))
            .await
            .unwrap();

        let outcome = store.remove_client("DROP").await.unwrap();
        assert_eq!(
            outcome,
            RemovalOutcome {
                commands_removed: 2,
                clients_removed: 1,
            }
        );

        let clients = store.list_clients().await.unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].key, "KEEP");

        let latest = store.latest_command().await.unwrap().unwrap();
        assert_eq!(latest.id, 1);
    }

    #[tokio::test]
    async fn test_remove_unknown_client_still_cascades() {
        let store = store();
        store
            .insert_command(NewCommand::join_room("lobby", "peer", Some("GHOST".into())))
            .await
            .unwrap();

        let outcome = store.remove_client("GHOST").await.unwrap();
        assert_eq!(outcome.clients_removed, 0);
        assert_eq!(outcome.commands_removed, 1);
        assert_eq!(store.latest_command().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = store();
        store.insert_client("ONE").await.unwrap();
        store.remove_client("ONE").await.unwrap();
        let id = store.insert_client("TWO").await.unwrap();
        assert_eq!(id, 2);
    }
}

//! Registry Service
//!
//! Client lifecycle and the join-room command log. Validates caller input,
//! generates keys, and turns store results into domain outcomes.

use crate::domain::ports::{Client, Command, NewCommand, RegistryStoreRef, RowId};
use crate::error::{Error, Result};
use crate::registry::key::generate_key;
use tracing::{debug, info};

/// Message for a remove request without a key
pub const NO_CLIENT_KEY: &str = "no client key";

/// Message for a join-room request without room or target
pub const INVALID_PARAMS: &str = "invalid params";

/// Treat empty strings the same as absent fields
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// =============================================================================
// Registry Service
// =============================================================================

/// Registry of clients and their commands over an injected store
#[derive(Clone)]
pub struct RegistryService {
    store: RegistryStoreRef,
}

impl RegistryService {
    pub fn new(store: RegistryStoreRef) -> Self {
        Self { store }
    }

    /// Name of the backing store
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    // =========================================================================
    // Clients
    // =========================================================================

    /// Register a new client under a freshly generated key
    pub async fn add_client(&self) -> Result<Client> {
        let key = generate_key();
        let id = self.store.insert_client(&key).await?;
        info!(client_id = id, "Client added");
        Ok(Client { id, key })
    }

    /// All clients in insertion order
    pub async fn list_clients(&self) -> Result<Vec<Client>> {
        self.store.list_clients().await
    }

    /// Remove a client and every command filed under its key.
    ///
    /// The command cascade runs even when no client has the key; the miss is
    /// reported afterwards as [`Error::ClientNotFound`].
    pub async fn remove_client(&self, key: Option<&str>) -> Result<String> {
        let key = present(key).ok_or(Error::MissingParameter(NO_CLIENT_KEY))?;

        let outcome = self.store.remove_client(key).await?;
        debug!(
            commands_removed = outcome.commands_removed,
            clients_removed = outcome.clients_removed,
            "Client removal applied"
        );

        if outcome.clients_removed == 0 {
            return Err(Error::ClientNotFound {
                key: key.to_string(),
            });
        }

        info!(commands_removed = outcome.commands_removed, "Client removed");
        Ok(key.to_string())
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Append a join-room directive and return its id.
    ///
    /// `room` and `target` are required; an empty `client_key` is stored as null.
    pub async fn submit_join_room(
        &self,
        room: Option<&str>,
        target: Option<&str>,
        client_key: Option<&str>,
    ) -> Result<RowId> {
        let (room, target) = match (present(room), present(target)) {
            (Some(room), Some(target)) => (room, target),
            _ => return Err(Error::InvalidParameters(INVALID_PARAMS)),
        };

        let command =
            NewCommand::join_room(room, target, present(client_key).map(str::to_string));
        let id = self.store.insert_command(command).await?;
        info!(command_id = id, room, target, "Join-room command submitted");
        Ok(id)
    }

    /// The most recently submitted command, if any
    pub async fn latest_command(&self) -> Result<Option<Command>> {
        self.store.latest_command().await
    }
}

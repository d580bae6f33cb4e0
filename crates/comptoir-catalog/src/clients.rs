//! Client directory: the fixed list of customers the cashier can pick from.

use std::collections::HashSet;
use std::path::Path;

use comptoir_core::{Client, CoreError, CoreResult, ValidationError};

use crate::error::{CatalogError, CatalogResult};

/// Read-only list of clients, always starting with the Divers sentinel.
#[derive(Debug, Clone)]
pub struct ClientDirectory {
    clients: Vec<Client>,
}

impl Default for ClientDirectory {
    fn default() -> Self {
        ClientDirectory {
            clients: vec![Client::divers()],
        }
    }
}

impl ClientDirectory {
    /// Builds a directory from `clients`.
    ///
    /// A Divers record in the input is dropped in favour of the built-in
    /// sentinel, which always comes first.
    pub fn new(clients: Vec<Client>) -> CatalogResult<Self> {
        let mut directory = ClientDirectory::default();
        let mut ids: HashSet<String> = HashSet::new();
        ids.insert(comptoir_core::DIVERS_CLIENT_ID.to_string());

        for client in clients {
            if client.is_divers() {
                continue;
            }
            client.validate().map_err(|source| CatalogError::InvalidEntry {
                id: client.id.clone(),
                source,
            })?;
            if !ids.insert(client.id.clone()) {
                return Err(CatalogError::InvalidEntry {
                    id: client.id.clone(),
                    source: ValidationError::Duplicate {
                        field: "id".to_string(),
                        value: client.id,
                    },
                });
            }
            directory.clients.push(client);
        }

        Ok(directory)
    }

    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let clients: Vec<Client> = serde_json::from_str(json)?;
        Self::new(clients)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let directory = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), clients = directory.len(), "Clients loaded");
        Ok(directory)
    }

    /// Looks a client up by id.
    pub fn get(&self, id: &str) -> CoreResult<&Client> {
        let id = id.trim();
        self.clients
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::ClientNotFound(id.to_string()))
    }

    /// Case-insensitive match on name, phone and email.
    pub fn search(&self, term: &str) -> Vec<&Client> {
        let needle = term.trim().to_lowercase();
        self.clients.iter().filter(|c| c.matches(&needle)).collect()
    }

    pub fn all(&self) -> &[Client] {
        &self.clients
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Never true: Divers is always present.
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

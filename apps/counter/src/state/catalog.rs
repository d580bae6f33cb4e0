//! # Catalog State
//!
//! Resolver, client directory and the candidate list of the last search.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use comptoir_catalog::{
    CatalogProvider, CatalogResolver, ClientDirectory, HttpCatalog, InMemoryCatalog,
};
use comptoir_core::CatalogEntry;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::state::config::{AppConfig, CatalogSource};

/// Per-request bound for the HTTP client, above the lookup timeout so the
/// resolver reports the timeout first.
const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Catalog access for command handlers.
pub struct CatalogState {
    resolver: Arc<CatalogResolver>,
    clients: ClientDirectory,
    last_search: Mutex<Vec<CatalogEntry>>,
}

impl CatalogState {
    pub fn new(resolver: Arc<CatalogResolver>, clients: ClientDirectory) -> Self {
        CatalogState {
            resolver,
            clients,
            last_search: Mutex::new(Vec::new()),
        }
    }

    /// Builds the provider and loads clients as configured.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let provider: Arc<dyn CatalogProvider> = match config.catalog.source {
            CatalogSource::File => {
                let catalog = InMemoryCatalog::from_json_file(&config.catalog.path)?;
                info!(path = ?config.catalog.path, products = catalog.len(), "File catalog ready");
                Arc::new(catalog)
            }
            CatalogSource::Http => {
                let base_url = config.catalog.base_url.as_deref().ok_or_else(|| {
                    AppError::InvalidConfig("catalog.base_url is required".into())
                })?;
                let catalog = HttpCatalog::new(base_url, HTTP_REQUEST_TIMEOUT)?;
                info!(base_url = %catalog.base_url(), "HTTP catalog ready");
                Arc::new(catalog)
            }
        };

        let clients = match &config.clients.path {
            Some(path) if path.exists() => ClientDirectory::from_json_file(path)?,
            Some(path) => {
                tracing::warn!(?path, "Client file not found, only Divers available");
                ClientDirectory::default()
            }
            None => ClientDirectory::default(),
        };

        let resolver = CatalogResolver::new(provider, config.catalog.lookup_timeout());
        Ok(Self::new(Arc::new(resolver), clients))
    }

    pub fn resolver(&self) -> &Arc<CatalogResolver> {
        &self.resolver
    }

    pub fn clients(&self) -> &ClientDirectory {
        &self.clients
    }

    /// Remembers the candidates shown by the search view.
    pub fn set_last_search(&self, candidates: Vec<CatalogEntry>) {
        *self
            .last_search
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = candidates;
    }

    /// Candidate at `position` in the last search, if any.
    pub fn search_candidate(&self, position: usize) -> Option<CatalogEntry> {
        self.last_search
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(position)
            .cloned()
    }
}

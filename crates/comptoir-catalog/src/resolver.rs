//! # Catalog Resolver
//!
//! Turns what the cashier typed or scanned into either a product for the
//! cart or a candidate list for the manual search view.
//!
//! ## Commit Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  input ──trim──► empty? ──yes──► OpenSearch { filter: None }            │
//! │                    │                                                    │
//! │                    no                                                   │
//! │                    ▼                                                    │
//! │             resolve_exact(code)  (bounded by lookup timeout)            │
//! │               │            │                                            │
//! │              hit     miss / error / timeout                             │
//! │               │            │                                            │
//! │               ▼            ▼                                            │
//! │         AddToCart   OpenSearch { filter: Some(input) }                  │
//! │                     (a failing search yields no candidates)             │
//! │                                                                         │
//! │  A newer commit cancels the one in flight: it returns Superseded.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookup failures never surface as errors from [`CatalogResolver::commit`];
//! they only change which view opens.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use comptoir_core::validation::{validate_barcode, validate_search_query};
use comptoir_core::CatalogEntry;
use tokio_util::sync::CancellationToken;

use crate::error::{CatalogError, CatalogResult};
use crate::provider::CatalogProvider;

/// Default bound on an exact barcode lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(3000);

/// What the screen should do after a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exact hit: add this entry to the cart.
    AddToCart(CatalogEntry),

    /// Open the manual search view.
    OpenSearch {
        filter: Option<String>,
        candidates: Vec<CatalogEntry>,
    },

    /// A newer commit replaced this one; nothing to do.
    Superseded,
}

/// Barcode resolution with search fallback over a [`CatalogProvider`].
pub struct CatalogResolver {
    provider: Arc<dyn CatalogProvider>,
    lookup_timeout: Duration,
    in_flight: Mutex<CancellationToken>,
}

impl CatalogResolver {
    pub fn new(provider: Arc<dyn CatalogProvider>, lookup_timeout: Duration) -> Self {
        CatalogResolver {
            provider,
            lookup_timeout,
            in_flight: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn lookup_timeout(&self) -> Duration {
        self.lookup_timeout
    }

    /// Exact barcode lookup.
    ///
    /// ## Errors
    /// - [`CatalogError::NotFound`] for an unknown code, or one that cannot be
    ///   a barcode (empty, spaces, too long)
    /// - [`CatalogError::Timeout`] past the lookup timeout
    /// - whatever the provider reports
    pub async fn resolve_exact(&self, code: &str) -> CatalogResult<CatalogEntry> {
        let code = code.trim();
        if validate_barcode(code).is_err() {
            return Err(CatalogError::NotFound(code.to_string()));
        }

        let lookup = self.provider.get_by_barcode(code);
        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(found) => found?.ok_or_else(|| CatalogError::NotFound(code.to_string())),
            Err(_) => Err(CatalogError::Timeout(self.lookup_timeout)),
        }
    }

    /// Case-insensitive search; an empty term lists the whole catalog.
    pub async fn search(&self, term: &str) -> CatalogResult<Vec<CatalogEntry>> {
        let term = validate_search_query(term).map_err(CatalogError::InvalidQuery)?;
        self.provider.search(&term).await
    }

    /// Handles a commit (Enter after typing or a scan).
    ///
    /// Cancels any commit still in flight before starting.
    pub async fn commit(&self, input: &str) -> Resolution {
        let token = self.begin();
        let input = input.trim();

        if input.is_empty() {
            tracing::debug!("Empty commit, opening search");
            return self.open_search(None, &token).await;
        }

        match cancellable(&token, self.resolve_exact(input)).await {
            Ok(entry) => {
                tracing::debug!(code = %input, designation = %entry.designation, "Barcode resolved");
                Resolution::AddToCart(entry)
            }
            Err(CatalogError::Cancelled) => {
                tracing::debug!(code = %input, "Lookup superseded");
                Resolution::Superseded
            }
            Err(CatalogError::NotFound(_)) => {
                tracing::debug!(code = %input, "Unknown code, falling back to search");
                self.open_search(Some(input.to_string()), &token).await
            }
            Err(err) => {
                tracing::warn!(code = %input, error = %err, "Lookup failed, falling back to search");
                self.open_search(Some(input.to_string()), &token).await
            }
        }
    }

    /// Cancels the commit in flight, if any.
    pub fn cancel_pending(&self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
    }

    fn begin(&self) -> CancellationToken {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.cancel();
        *in_flight = CancellationToken::new();
        in_flight.clone()
    }

    async fn open_search(&self, filter: Option<String>, token: &CancellationToken) -> Resolution {
        let term = filter.as_deref().unwrap_or("");
        let candidates = match cancellable(token, self.search(term)).await {
            Ok(candidates) => candidates,
            Err(CatalogError::Cancelled) => return Resolution::Superseded,
            Err(err) => {
                tracing::warn!(filter = %term, error = %err, "Search failed, showing empty list");
                Vec::new()
            }
        };
        Resolution::OpenSearch { filter, candidates }
    }
}

async fn cancellable<T>(
    token: &CancellationToken,
    fut: impl std::future::Future<Output = CatalogResult<T>>,
) -> CatalogResult<T> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(CatalogError::Cancelled),
        result = fut => result,
    }
}

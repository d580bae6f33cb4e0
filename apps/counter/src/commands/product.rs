//! # Product Commands
//!
//! Getting products into the cart.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Scan or type + Enter                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commit_input ──► resolver.commit ──┬── AddToCart ──► line added        │
//! │                                     ├── OpenSearch ─► candidates shown  │
//! │                                     └── Superseded ─► nothing           │
//! │                                                                         │
//! │  :search <term>  ──► open_search                                        │
//! │  :pick <n>       ──► pick_from_search (adds candidate n)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use comptoir_catalog::Resolution;
use comptoir_core::{CatalogEntry, Command, SessionSnapshot};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, SessionState};

/// Result of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CommitResponse {
    /// Exact hit, line added.
    #[serde(rename_all = "camelCase")]
    Added {
        designation: String,
        session: SessionSnapshot,
    },

    /// Manual search view opened.
    #[serde(rename_all = "camelCase")]
    Search {
        filter: Option<String>,
        candidates: Vec<CatalogEntry>,
    },

    /// A newer commit took over.
    Superseded,
}

/// Candidate list for the search view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub filter: Option<String>,
    pub candidates: Vec<CatalogEntry>,
}

/// Handles Enter on the input field: exact barcode first, search otherwise.
///
/// ## Errors
/// Only cart refusals (duplicate line, full cart). Lookup failures open the
/// search view instead.
pub async fn commit_input(
    session: &SessionState,
    catalog: &CatalogState,
    input: &str,
) -> Result<CommitResponse, ApiError> {
    debug!(input = %input, "commit_input command");

    match catalog.resolver().commit(input).await {
        Resolution::AddToCart(entry) => {
            let designation = entry.designation.clone();
            let snapshot = session.with_session_mut(|s| {
                s.dispatch(Command::AddProduct(entry))?;
                Ok::<_, ApiError>(s.snapshot())
            })?;
            Ok(CommitResponse::Added {
                designation,
                session: snapshot,
            })
        }
        Resolution::OpenSearch { filter, candidates } => {
            catalog.set_last_search(candidates.clone());
            Ok(CommitResponse::Search { filter, candidates })
        }
        Resolution::Superseded => Ok(CommitResponse::Superseded),
    }
}

/// Opens the manual search view filtered by `term` (empty: everything).
pub async fn open_search(catalog: &CatalogState, term: &str) -> Result<SearchResponse, ApiError> {
    debug!(term = %term, "open_search command");

    let candidates = catalog.resolver().search(term).await?;
    catalog.set_last_search(candidates.clone());

    let term = term.trim();
    Ok(SearchResponse {
        filter: (!term.is_empty()).then(|| term.to_string()),
        candidates,
    })
}

/// Adds the candidate at `position` (0-based) of the last search.
pub fn pick_from_search(
    session: &SessionState,
    catalog: &CatalogState,
    position: usize,
) -> Result<SessionSnapshot, ApiError> {
    debug!(position, "pick_from_search command");

    let entry = catalog
        .search_candidate(position)
        .ok_or_else(|| ApiError::not_found("Search result", &(position + 1).to_string()))?;

    session.with_session_mut(|s| {
        s.dispatch(Command::AddProduct(entry))?;
        Ok::<_, ApiError>(s.snapshot())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{catalog_state, session_state};
    use crate::error::ErrorCode;
    use comptoir_core::Money;

    #[tokio::test]
    async fn test_scan_adds_line() {
        let session = session_state();
        let catalog = catalog_state();

        let response = commit_input(&session, &catalog, "6111000000017").await.unwrap();

        let CommitResponse::Added { designation, session: snapshot } = response else {
            panic!("expected Added, got {:?}", response);
        };
        assert_eq!(designation, "Laptop Dell XPS 13");
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.totals.total, Money::from_major(125_000));
    }

    #[tokio::test]
    async fn test_rescan_reports_duplicate() {
        let session = session_state();
        let catalog = catalog_state();
        commit_input(&session, &catalog, "6111000000017").await.unwrap();

        let err = commit_input(&session, &catalog, "6111000000017").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(session.with_session(|s| s.cart().item_count()), 1);
    }

    #[tokio::test]
    async fn test_unknown_code_then_pick() {
        let session = session_state();
        let catalog = catalog_state();

        let response = commit_input(&session, &catalog, "dell").await.unwrap();
        let CommitResponse::Search { filter, candidates } = response else {
            panic!("expected Search, got {:?}", response);
        };
        assert_eq!(filter.as_deref(), Some("dell"));
        assert_eq!(candidates.len(), 2);

        let snapshot = pick_from_search(&session, &catalog, 1).unwrap();
        assert_eq!(snapshot.items[0].designation(), "Dell Dock WD19");
    }

    #[tokio::test]
    async fn test_empty_commit_lists_catalog() {
        let session = session_state();
        let catalog = catalog_state();

        let response = commit_input(&session, &catalog, "  ").await.unwrap();

        assert!(matches!(
            response,
            CommitResponse::Search { filter: None, ref candidates } if candidates.len() == 3
        ));
    }

    #[tokio::test]
    async fn test_open_search() {
        let catalog = catalog_state();

        let response = open_search(&catalog, " Galaxy ").await.unwrap();

        assert_eq!(response.filter.as_deref(), Some("Galaxy"));
        assert_eq!(response.candidates[0].id, "p-2");
        assert_eq!(catalog.search_candidate(0).unwrap().id, "p-2");
    }

    #[test]
    fn test_pick_without_search() {
        let err = pick_from_search(&session_state(), &catalog_state(), 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_commit_response_json() {
        let json = serde_json::to_value(CommitResponse::Superseded).unwrap();
        assert_eq!(json["kind"], "superseded");
    }
}

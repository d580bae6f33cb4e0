//! # Client Commands
//!
//! Choosing who the sale is for. Selecting a client changes the discount, so
//! every command returns a fresh snapshot with recomputed totals.

use comptoir_core::{Client, Command, SessionSnapshot};
use tracing::debug;

use crate::commands::cart::apply;
use crate::error::ApiError;
use crate::state::{CatalogState, SessionState};

/// Clients matching `term` (all of them when `None` or blank), Divers first.
pub fn list_clients(catalog: &CatalogState, term: Option<&str>) -> Vec<Client> {
    debug!(term = ?term, "list_clients command");
    catalog
        .clients()
        .search(term.unwrap_or(""))
        .into_iter()
        .cloned()
        .collect()
}

/// Selects the client with `id`.
///
/// ## Errors
/// `NOT_FOUND` for an unknown id; the current selection is kept.
pub fn select_client(
    session: &SessionState,
    catalog: &CatalogState,
    id: &str,
) -> Result<SessionSnapshot, ApiError> {
    debug!(id = %id, "select_client command");
    let client = catalog.clients().get(id)?.clone();
    apply(session, Command::SelectClient(client))
}

/// Back to "no client selected".
pub fn deselect_client(session: &SessionState) -> Result<SessionSnapshot, ApiError> {
    debug!("deselect_client command");
    apply(session, Command::DeselectClient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{catalog_state, session_state};
    use crate::commands::product::commit_input;
    use crate::error::ErrorCode;
    use comptoir_core::Money;

    #[test]
    fn test_list_clients() {
        let catalog = catalog_state();

        let all = list_clients(&catalog, None);
        assert_eq!(all.len(), 3);
        assert!(all[0].is_divers());

        let atlas = list_clients(&catalog, Some("atlas"));
        assert_eq!(atlas.len(), 1);
        assert_eq!(atlas[0].id, "c-2");
    }

    #[tokio::test]
    async fn test_client_discount_applies_to_totals() {
        let session = session_state();
        let catalog = catalog_state();
        commit_input(&session, &catalog, "6111000000017").await.unwrap();
        commit_input(&session, &catalog, "6111000000024").await.unwrap();

        let snapshot = select_client(&session, &catalog, "c-1").unwrap();
        assert_eq!(snapshot.totals.total, Money::from_major(203_300));
        assert_eq!(snapshot.client.as_ref().map(|c| c.id.as_str()), Some("c-1"));

        let snapshot = deselect_client(&session).unwrap();
        assert_eq!(snapshot.totals.total, Money::from_major(214_000));
        assert!(snapshot.client.is_none());
    }

    #[test]
    fn test_unknown_client_keeps_selection() {
        let session = session_state();
        let catalog = catalog_state();
        select_client(&session, &catalog, "divers").unwrap();

        let err = select_client(&session, &catalog, "c-404").unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(session.with_session(|s| s.client_context().is_selected()));
    }
}

//! # Sale Commands
//!
//! Completing the transaction.
//!
//! ```text
//! validate_transaction
//!   ├── empty cart        → SALE_ERROR "Cart is empty"
//!   ├── no client         → SALE_ERROR "No client selected"
//!   └── otherwise         → CompletedSale, cart cleared, client kept
//! ```

use comptoir_core::{Command, CompletedSale, Outcome};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::SessionState;

/// Validates the sale in progress.
pub fn validate_transaction(session: &SessionState) -> Result<CompletedSale, ApiError> {
    debug!("validate_transaction command");

    let outcome = session.with_session_mut(|s| s.dispatch(Command::Validate))?;
    let Outcome::Sold(sale) = outcome else {
        return Err(ApiError::internal("Validation did not produce a sale"));
    };

    info!(
        ticket = %sale.ticket_number,
        client = %sale.client.name,
        lines = sale.items.len(),
        total = %sale.total,
        "Sale completed"
    );
    Ok(sale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::client::select_client;
    use crate::commands::fixtures::{catalog_state, session_state};
    use crate::commands::product::commit_input;
    use crate::error::ErrorCode;
    use comptoir_core::Money;

    #[test]
    fn test_empty_cart() {
        let err = validate_transaction(&session_state()).unwrap_err();
        assert_eq!(err.code, ErrorCode::SaleError);
        assert_eq!(err.message, "Cart is empty");
    }

    #[tokio::test]
    async fn test_no_client_keeps_cart() {
        let session = session_state();
        let catalog = catalog_state();
        commit_input(&session, &catalog, "6111000000017").await.unwrap();

        let err = validate_transaction(&session).unwrap_err();

        assert_eq!(err.message, "No client selected");
        assert_eq!(session.with_session(|s| s.cart().item_count()), 1);
    }

    #[tokio::test]
    async fn test_full_sale() {
        let session = session_state();
        let catalog = catalog_state();
        commit_input(&session, &catalog, "6111000000017").await.unwrap();
        commit_input(&session, &catalog, "6111000000024").await.unwrap();
        select_client(&session, &catalog, "c-1").unwrap();

        let sale = validate_transaction(&session).unwrap();

        assert_eq!(sale.ticket_number, "VC-000001");
        assert_eq!(sale.total, Money::from_major(203_300));
        assert_eq!(sale.discount, Money::from_major(10_700));
        session.with_session(|s| {
            assert!(s.cart().is_empty());
            assert_eq!(s.client_context().client().map(|c| c.id.as_str()), Some("c-1"));
        });
    }
}

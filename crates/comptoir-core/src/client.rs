//! # Client Context
//!
//! The customer attached to the sale in progress.
//!
//! Three states matter:
//! ```text
//! ┌──────────────────┐   select(c)    ┌──────────────────┐
//! │  No client       │ ─────────────► │  Client selected │  (any client,
//! │  (initial state) │ ◄───────────── │                  │   Divers included)
//! └──────────────────┘    clear()     └──────────────────┘
//! ```
//!
//! "No client" and "Divers" are different: only the former blocks
//! validation. Both contribute a zero discount to totals.

use crate::money::Money;
use crate::types::{Client, DiscountRate};

/// Holds the selected client, if any.
#[derive(Debug, Clone, Default)]
pub struct ClientContext {
    selected: Option<Client>,
}

impl ClientContext {
    pub fn new() -> Self {
        ClientContext::default()
    }

    /// Replaces the active client. Totals must be recomputed afterwards.
    pub fn select(&mut self, client: Client) {
        self.selected = Some(client);
    }

    /// Back to "no client selected".
    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    pub fn client(&self) -> Option<&Client> {
        self.selected.as_ref()
    }

    /// Discount of the active client; zero when nobody is selected.
    pub fn discount(&self) -> DiscountRate {
        self.selected
            .as_ref()
            .map(Client::discount)
            .unwrap_or_default()
    }

    pub fn balance(&self) -> Money {
        self.selected
            .as_ref()
            .map(|c| c.balance)
            .unwrap_or_default()
    }

    pub fn loyalty_points(&self) -> u32 {
        self.selected
            .as_ref()
            .map(|c| c.loyalty_points)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regular() -> Client {
        Client {
            id: "c-1".to_string(),
            name: "Karim Benali".to_string(),
            phone: None,
            email: None,
            address: None,
            balance: Money::from_major(-1_500),
            loyalty_points: 120,
            discount_bps: 500,
        }
    }

    #[test]
    fn test_no_client_reads_as_zero() {
        let ctx = ClientContext::new();
        assert!(!ctx.is_selected());
        assert!(ctx.discount().is_zero());
        assert!(ctx.balance().is_zero());
        assert_eq!(ctx.loyalty_points(), 0);
    }

    #[test]
    fn test_select_exposes_client_data() {
        let mut ctx = ClientContext::new();
        ctx.select(regular());

        assert!(ctx.is_selected());
        assert_eq!(ctx.discount(), DiscountRate::from_bps(500));
        assert_eq!(ctx.balance(), Money::from_major(-1_500));
        assert_eq!(ctx.loyalty_points(), 120);
    }

    #[test]
    fn test_divers_is_a_selection() {
        let mut ctx = ClientContext::new();
        ctx.select(Client::divers());

        assert!(ctx.is_selected());
        assert!(ctx.discount().is_zero());
        assert!(ctx.client().is_some_and(Client::is_divers));
    }

    #[test]
    fn test_select_replaces_and_clear_resets() {
        let mut ctx = ClientContext::new();
        ctx.select(regular());
        ctx.select(Client::divers());
        assert!(ctx.discount().is_zero());

        ctx.clear();
        assert!(!ctx.is_selected());
        assert!(ctx.client().is_none());
    }
}

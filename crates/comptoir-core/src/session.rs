//! # Counter-Sale Session
//!
//! The one aggregate the counter-sale screen owns: cart, client context and
//! validator, mutated only through [`Command`]s.
//!
//! ## Command Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Screen event ──► Command ──► CounterSaleSession::dispatch ──► Outcome  │
//! │                                          │                     or       │
//! │                                          │                  CoreError   │
//! │                                          ▼                              │
//! │                          ┌───────────────────────────────┐              │
//! │                          │ Cart │ ClientContext │ Valid. │              │
//! │                          └───────────────────────────────┘              │
//! │                                                                         │
//! │  The caller decides how to present the result (toast, beep, dialog).   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are never cached: [`CounterSaleSession::totals`] derives them from
//! the current cart and client on every call.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::cart::{Cart, CartTotals, LineItem};
use crate::client::ClientContext;
use crate::error::CoreResult;
use crate::types::{CatalogEntry, Client, TaxRate};
use crate::validator::{CompletedSale, TransactionValidator, ValidatorStats};

/// Everything the screen can ask the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add one unit of a resolved or picked catalog entry.
    AddProduct(CatalogEntry),
    SelectRow(usize),
    /// Select a row, or deselect it if it already is.
    ToggleRow(usize),
    DeselectRow,
    RemoveSelected,
    /// Cancel the transaction in progress.
    Clear,
    SelectClient(Client),
    DeselectClient,
    Validate,
}

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added { index: usize },
    RowSelection(Option<usize>),
    Removed(LineItem),
    Cleared,
    ClientChanged(Option<Client>),
    Sold(CompletedSale),
}

/// Read-only view of the session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionSnapshot {
    pub items: Vec<LineItem>,
    pub selected_index: Option<usize>,
    pub client: Option<Client>,
    pub totals: CartTotals,
}

/// The counter-sale aggregate.
#[derive(Debug, Clone, Default)]
pub struct CounterSaleSession {
    cart: Cart,
    clients: ClientContext,
    validator: TransactionValidator,
}

impl CounterSaleSession {
    /// Opens a session whose tickets report `tax_rate` as included.
    pub fn new(tax_rate: TaxRate) -> Self {
        CounterSaleSession {
            cart: Cart::new(),
            clients: ClientContext::new(),
            validator: TransactionValidator::new(tax_rate),
        }
    }

    /// Applies `command` now.
    pub fn dispatch(&mut self, command: Command) -> CoreResult<Outcome> {
        self.dispatch_at(command, Utc::now())
    }

    /// Applies `command`, stamping a completed sale with `now`.
    pub fn dispatch_at(&mut self, command: Command, now: DateTime<Utc>) -> CoreResult<Outcome> {
        match command {
            Command::AddProduct(entry) => {
                let index = self.cart.add_item(&entry)?;
                Ok(Outcome::Added { index })
            }
            Command::SelectRow(index) => {
                self.cart.select(index)?;
                Ok(Outcome::RowSelection(Some(index)))
            }
            Command::ToggleRow(index) => {
                let selection = self.cart.toggle(index)?;
                Ok(Outcome::RowSelection(selection))
            }
            Command::DeselectRow => {
                self.cart.deselect();
                Ok(Outcome::RowSelection(None))
            }
            Command::RemoveSelected => {
                let removed = self.cart.remove_selected()?;
                Ok(Outcome::Removed(removed))
            }
            Command::Clear => {
                self.cart.clear();
                Ok(Outcome::Cleared)
            }
            Command::SelectClient(client) => {
                client.validate()?;
                self.clients.select(client.clone());
                Ok(Outcome::ClientChanged(Some(client)))
            }
            Command::DeselectClient => {
                self.clients.clear();
                Ok(Outcome::ClientChanged(None))
            }
            Command::Validate => {
                let sale = self.validator.validate(&mut self.cart, &self.clients, now)?;
                Ok(Outcome::Sold(sale))
            }
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn client_context(&self) -> &ClientContext {
        &self.clients
    }

    pub fn stats(&self) -> ValidatorStats {
        self.validator.stats()
    }

    /// Current totals with the active client's discount.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals(self.clients.discount())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            items: self.cart.items().to_vec(),
            selected_index: self.cart.selected_index(),
            client: self.clients.client().cloned(),
            totals: self.totals(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use crate::money::Money;

    fn entry(designation: &str, major: i64) -> CatalogEntry {
        CatalogEntry {
            id: designation.to_lowercase().replace(' ', "-"),
            designation: designation.to_string(),
            unit_price: Money::from_major(major),
            stock_quantity: 3,
            category: "High-Tech".to_string(),
            barcode: None,
        }
    }

    fn five_percent_client() -> Client {
        Client {
            id: "c-42".to_string(),
            name: "Société Atlas".to_string(),
            discount_bps: 500,
            ..Client::divers()
        }
    }

    #[test]
    fn test_scenario_two_products_five_percent() {
        let mut session = CounterSaleSession::default();
        session
            .dispatch(Command::AddProduct(entry("Laptop Dell XPS 13", 125_000)))
            .unwrap();
        session
            .dispatch(Command::AddProduct(entry("Smartphone Samsung Galaxy S24", 89_000)))
            .unwrap();
        assert_eq!(session.totals().total, Money::from_major(214_000));

        session
            .dispatch(Command::SelectClient(five_percent_client()))
            .unwrap();

        assert_eq!(session.totals().total, Money::from_major(203_300));
    }

    #[test]
    fn test_scenario_fresh_session_validate() {
        let mut session = CounterSaleSession::default();
        assert_eq!(
            session.dispatch(Command::Validate).unwrap_err(),
            CoreError::EmptyCart
        );
    }

    #[test]
    fn test_scenario_no_client_keeps_line() {
        let mut session = CounterSaleSession::default();
        session
            .dispatch(Command::AddProduct(entry("Laptop Dell XPS 13", 125_000)))
            .unwrap();

        assert_eq!(
            session.dispatch(Command::Validate).unwrap_err(),
            CoreError::NoClient
        );
        assert_eq!(session.cart().item_count(), 1);
    }

    #[test]
    fn test_totals_follow_every_mutation() {
        let mut session = CounterSaleSession::default();
        session.dispatch(Command::AddProduct(entry("A", 1_000))).unwrap();
        session.dispatch(Command::AddProduct(entry("B", 3_000))).unwrap();
        session
            .dispatch(Command::SelectClient(five_percent_client()))
            .unwrap();
        assert_eq!(session.totals().total, Money::from_major(3_800));

        session.dispatch(Command::SelectRow(1)).unwrap();
        session.dispatch(Command::RemoveSelected).unwrap();
        assert_eq!(session.totals().total, Money::from_major(950));

        session.dispatch(Command::DeselectClient).unwrap();
        assert_eq!(session.totals().total, Money::from_major(1_000));

        session.dispatch(Command::Clear).unwrap();
        assert_eq!(session.totals().total, Money::zero());
    }

    #[test]
    fn test_validate_commits_and_keeps_client() {
        let mut session = CounterSaleSession::new(TaxRate::zero());
        session.dispatch(Command::AddProduct(entry("A", 500))).unwrap();
        session.dispatch(Command::SelectRow(0)).unwrap();
        session
            .dispatch(Command::SelectClient(Client::divers()))
            .unwrap();
        let now = Utc::now();

        let outcome = session.dispatch_at(Command::Validate, now).unwrap();

        let Outcome::Sold(sale) = outcome else {
            panic!("expected a sale, got {:?}", outcome);
        };
        assert_eq!(sale.total, Money::from_major(500));
        assert_eq!(sale.completed_at, now);
        assert!(session.cart().is_empty());
        assert_eq!(session.cart().selected_index(), None);
        assert!(session.client_context().is_selected());
        assert_eq!(session.stats().completed, 1);
    }

    #[test]
    fn test_failed_commands_leave_state_unchanged() {
        let mut session = CounterSaleSession::default();
        session.dispatch(Command::AddProduct(entry("A", 500))).unwrap();
        let before = session.snapshot();

        assert!(session.dispatch(Command::AddProduct(entry("A", 9))).is_err());
        assert!(session.dispatch(Command::RemoveSelected).is_err());
        assert!(session.dispatch(Command::SelectRow(7)).is_err());
        assert!(session.dispatch(Command::Validate).is_err());

        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_select_client_rejects_discount_over_full() {
        let mut session = CounterSaleSession::default();
        session.dispatch(Command::AddProduct(entry("A", 100))).unwrap();
        let greedy = Client {
            discount_bps: 20_000,
            ..five_percent_client()
        };

        let err = session.dispatch(Command::SelectClient(greedy)).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert!(!session.client_context().is_selected());
        assert_eq!(session.totals().total, Money::from_major(100));
    }

    #[test]
    fn test_toggle_row_outcomes() {
        let mut session = CounterSaleSession::default();
        session.dispatch(Command::AddProduct(entry("A", 1))).unwrap();

        assert_eq!(
            session.dispatch(Command::ToggleRow(0)).unwrap(),
            Outcome::RowSelection(Some(0))
        );
        assert_eq!(
            session.dispatch(Command::ToggleRow(0)).unwrap(),
            Outcome::RowSelection(None)
        );
        session.dispatch(Command::SelectRow(0)).unwrap();
        assert_eq!(
            session.dispatch(Command::DeselectRow).unwrap(),
            Outcome::RowSelection(None)
        );
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let mut session = CounterSaleSession::default();
        session.dispatch(Command::AddProduct(entry("A", 12))).unwrap();

        let json = serde_json::to_value(session.snapshot()).unwrap();

        assert_eq!(json["selectedIndex"], serde_json::Value::Null);
        assert_eq!(json["items"][0]["lineTotal"], 1200);
        assert_eq!(json["totals"]["total"], 1200);
    }
}

//! # Transaction Validator
//!
//! Completes the sale in progress.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │        add / remove / select / client edits                             │
//! │              ┌──────┐                                                   │
//! │              ▼      │                                                   │
//! │          ┌──────────┴┐   validate    ┌──────────────────────────────┐  │
//! │          │   Idle    │──────────────►│ cart empty?   → EmptyCart    │  │
//! │          └───────────┘               │ no client?    → NoClient     │  │
//! │                ▲                     │ otherwise     → Sold, clear  │  │
//! │                │                     └──────────────┬───────────────┘  │
//! │                └────────────────────────────────────┘                  │
//! │                     (Idle again after either outcome)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! On failure neither the cart nor the client context is touched.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, LineItem};
use crate::client::ClientContext;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Client, DiscountRate, TaxRate};

/// Prefix of counter-sale ticket numbers.
pub const TICKET_PREFIX: &str = "VC";

// =============================================================================
// Completed Sale
// =============================================================================

/// The sale handed back on a successful validation.
///
/// Snapshot only: nothing here is persisted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompletedSale {
    pub id: String,
    pub ticket_number: String,
    pub client: Client,
    pub items: Vec<LineItem>,
    pub subtotal: Money,
    pub discount_rate: DiscountRate,
    pub discount: Money,
    pub total: Money,
    /// Flat-rate tax contained in `total`.
    pub included_tax: Money,
    #[ts(as = "String")]
    pub completed_at: DateTime<Utc>,
}

// =============================================================================
// Validator
// =============================================================================

/// Running counters of validation attempts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ValidatorStats {
    pub attempts: u64,
    pub completed: u64,
    pub rejected: u64,
}

/// Checks the preconditions of a sale and commits it.
///
/// Always `Idle` between calls; the only state it carries is the ticket
/// sequence and attempt counters.
#[derive(Debug, Clone)]
pub struct TransactionValidator {
    tax_rate: TaxRate,
    next_ticket: u64,
    stats: ValidatorStats,
}

impl Default for TransactionValidator {
    fn default() -> Self {
        TransactionValidator::new(TaxRate::zero())
    }
}

impl TransactionValidator {
    /// Creates a validator whose tickets report `tax_rate` as included.
    pub fn new(tax_rate: TaxRate) -> Self {
        TransactionValidator {
            tax_rate,
            next_ticket: 1,
            stats: ValidatorStats::default(),
        }
    }

    pub fn stats(&self) -> ValidatorStats {
        self.stats
    }

    /// Validates the transaction at `now`.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] if the cart has no line (checked first)
    /// - [`CoreError::NoClient`] if no client is selected
    ///
    /// On success the cart is cleared (lines and selection) and the client
    /// selection is kept for the next sale.
    pub fn validate(
        &mut self,
        cart: &mut Cart,
        clients: &ClientContext,
        now: DateTime<Utc>,
    ) -> CoreResult<CompletedSale> {
        self.stats.attempts += 1;

        let client = match Self::check(cart, clients) {
            Ok(client) => client.clone(),
            Err(err) => {
                self.stats.rejected += 1;
                return Err(err);
            }
        };

        let totals = cart.totals(client.discount());
        let sale = CompletedSale {
            id: Uuid::new_v4().to_string(),
            ticket_number: format!("{}-{:06}", TICKET_PREFIX, self.next_ticket),
            client,
            items: cart.items().to_vec(),
            subtotal: totals.subtotal,
            discount_rate: totals.discount_rate,
            discount: totals.discount,
            total: totals.total,
            included_tax: totals.total.included_tax(self.tax_rate),
            completed_at: now,
        };

        cart.clear();
        self.next_ticket += 1;
        self.stats.completed += 1;
        Ok(sale)
    }

    fn check<'a>(cart: &Cart, clients: &'a ClientContext) -> CoreResult<&'a Client> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        clients.client().ok_or(CoreError::NoClient)
    }
}

//! # comptoir-core: Counter-Sale Engine
//!
//! Business rules of the counter-sale ("Vente Comptoir") screen: cart
//! lines, client discount, totals and transaction validation. Pure logic,
//! no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Comptoir POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/counter (terminal screen)                  │   │
//! │  │     scan ──► search ──► cart ──► client ──► validate            │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼──────────────┐   ┌───────────────▼────────────────┐  │
//! │  │      comptoir-catalog       │   │  ★ comptoir-core (THIS) ★      │  │
//! │  │  providers, resolver,       │   │                                │  │
//! │  │  client directory           │──►│  money  types  cart  client    │  │
//! │  └─────────────────────────────┘   │  validator  session            │  │
//! │                                    │                                │  │
//! │                                    │  NO I/O • NO NETWORK           │  │
//! │                                    └────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer minor-unit money and discount rounding
//! - [`types`] - Catalog entries, clients, discount and tax rates
//! - [`cart`] - Cart lines, selection and totals
//! - [`client`] - The client attached to the sale
//! - [`validator`] - Sale completion
//! - [`session`] - The aggregate driven by commands
//! - [`validation`] - Input rules
//! - [`error`] - Domain errors
//!
//! ## Example Usage
//!
//! ```rust
//! use comptoir_core::{CatalogEntry, Client, Command, CounterSaleSession, Money};
//!
//! let mut session = CounterSaleSession::default();
//! session
//!     .dispatch(Command::AddProduct(CatalogEntry {
//!         id: "p-1".to_string(),
//!         designation: "Laptop Dell XPS 13".to_string(),
//!         unit_price: Money::from_major(125_000),
//!         stock_quantity: 4,
//!         category: "Informatique".to_string(),
//!         barcode: None,
//!     }))
//!     .unwrap();
//! session.dispatch(Command::SelectClient(Client::divers())).unwrap();
//!
//! assert_eq!(session.totals().total, Money::from_major(125_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod client;
pub mod error;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;
pub mod validator;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals, LineItem};
pub use client::ClientContext;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use session::{Command, CounterSaleSession, Outcome, SessionSnapshot};
pub use types::*;
pub use validator::{CompletedSale, TransactionValidator, ValidatorStats};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

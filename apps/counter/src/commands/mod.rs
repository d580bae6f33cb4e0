//! # Commands Module
//!
//! The operations the counter-sale screen exposes, one function each.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Scan/commit, manual search, pick from list
//! ├── cart.rs     ◄─── Snapshot, row selection, remove, cancel
//! ├── client.rs   ◄─── Client list and selection
//! └── sale.rs     ◄─── Transaction validation
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Terminal line ──► repl::parse_line ──► command fn(&State, args)        │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                          Result<Response, ApiError>                     │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                        repl renders the cart or a notification          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs.

pub mod cart;
pub mod client;
pub mod product;
pub mod sale;

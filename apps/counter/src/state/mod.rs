//! # State Module
//!
//! Application state shared by the command handlers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  SessionState    │  │  CatalogState    │  │  AppConfig           │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  Arc<Mutex<      │  │  resolver        │  │  store, catalog,     │  │
//! │  │   CounterSale    │  │  client list     │  │  clients sections    │  │
//! │  │   Session>>      │  │  last search     │  │                      │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  SessionState: exclusive access through the mutex                      │
//! │  CatalogState: resolver is internally synchronized                     │
//! │  AppConfig: read-only after startup                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod session;

pub use catalog::CatalogState;
pub use config::{AppConfig, CatalogSettings, CatalogSource, ClientSettings, StoreSettings};
pub use session::SessionState;

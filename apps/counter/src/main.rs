//! # Comptoir Counter Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Comptoir Counter                                 │
//! │                                                                         │
//! │  stdin ──► repl ──► commands/ ──► CounterSaleSession (comptoir-core)    │
//! │                         │                                               │
//! │                         └────────► CatalogResolver (comptoir-catalog)   │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                           catalog.json  or  HTTP data-access layer      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

#[tokio::main]
async fn main() {
    if let Err(err) = comptoir_counter_lib::run().await {
        eprintln!("comptoir-counter: {}", err);
        std::process::exit(1);
    }
}

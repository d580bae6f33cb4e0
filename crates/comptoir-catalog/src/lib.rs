//! # comptoir-catalog: Catalog Access for Comptoir POS
//!
//! Products and clients come from outside the engine. This crate owns those
//! calls and the barcode-then-search protocol built on top of them.
//!
//! ## Modules
//!
//! - [`provider`] - The `CatalogProvider` trait and response envelope
//! - [`memory`] - JSON-backed in-memory catalog
//! - [`http`] - HTTP data-access layer client
//! - [`resolver`] - Barcode resolution with search fallback
//! - [`clients`] - Client directory
//! - [`error`] - Catalog errors
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use comptoir_catalog::{CatalogResolver, InMemoryCatalog, Resolution, DEFAULT_LOOKUP_TIMEOUT};
//!
//! # async fn run() -> comptoir_catalog::CatalogResult<()> {
//! let catalog = InMemoryCatalog::from_json_file("data/catalog.json")?;
//! let resolver = CatalogResolver::new(Arc::new(catalog), DEFAULT_LOOKUP_TIMEOUT);
//!
//! match resolver.commit("6111000000017").await {
//!     Resolution::AddToCart(entry) => println!("add {}", entry.designation),
//!     Resolution::OpenSearch { candidates, .. } => println!("{} candidates", candidates.len()),
//!     Resolution::Superseded => {}
//! }
//! # Ok(())
//! # }
//! ```

pub mod clients;
pub mod error;
pub mod http;
pub mod memory;
pub mod provider;
pub mod resolver;

pub use clients::ClientDirectory;
pub use error::{CatalogError, CatalogResult};
pub use http::HttpCatalog;
pub use memory::InMemoryCatalog;
pub use provider::{CatalogProvider, ProviderResponse};
pub use resolver::{CatalogResolver, Resolution, DEFAULT_LOOKUP_TIMEOUT};

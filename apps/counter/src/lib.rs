//! # Comptoir Counter Library
//!
//! Core library for the Comptoir counter-sale terminal.
//! This is the main entry point that loads configuration and runs the screen.
//!
//! ## Module Organization
//! ```text
//! comptoir_counter_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Shared counter-sale session
//! │   ├── catalog.rs  ◄─── Resolver, client directory, last search
//! │   └── config.rs   ◄─── Configuration (TOML + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Scan/commit and search commands
//! │   ├── cart.rs     ◄─── Row selection, removal, cancel
//! │   ├── client.rs   ◄─── Client commands
//! │   └── sale.rs     ◄─── Transaction validation
//! ├── repl.rs         ◄─── Terminal input loop and rendering
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State
//! ```text
//! ┌──────────────────────┐ ┌──────────────────────┐ ┌──────────────────────┐
//! │    SessionState      │ │    CatalogState      │ │     AppConfig        │
//! │                      │ │                      │ │                      │
//! │  • Cart + selection  │ │  • CatalogResolver   │ │  • Store, currency   │
//! │  • Selected client   │ │  • Client directory  │ │  • Tax rate          │
//! │  • Validator         │ │  • Last search list  │ │  • Catalog source    │
//! └──────────────────────┘ └──────────────────────┘ └──────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod repl;
pub mod state;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::AppResult;
use repl::Repl;
use state::{AppConfig, CatalogState, SessionState};

/// Comptoir counter - counter-sale terminal
#[derive(Debug, Parser)]
#[command(name = "comptoir-counter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path (default: the platform config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Runs the counter terminal until stdin closes or the cashier quits.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging (stderr, RUST_LOG or "info,comptoir=debug")     │
/// │  2. Load Config (--config <path>, user config dir, COMPTOIR_* env)      │
/// │  3. Open Catalog (JSON file or HTTP) and client directory               │
/// │  4. Create an empty session with the configured tax rate                │
/// │  5. Read lines until :quit                                              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing();

    info!("Starting Comptoir counter");

    let config = AppConfig::load(cli.config)?;
    info!(
        store = %config.store.name,
        catalog = ?config.catalog.source,
        "Configuration loaded"
    );

    let catalog = CatalogState::from_config(&config)?;
    let session = SessionState::new(config.tax_rate());

    info!("State initialized");
    Repl::new(config, session, catalog).run().await
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never interleave with the sale screen.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=comptoir_catalog=trace` - Trace catalog calls only
/// - Default: INFO, DEBUG for comptoir crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,comptoir=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

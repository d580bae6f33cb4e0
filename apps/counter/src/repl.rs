//! # Terminal Front End
//!
//! Line-oriented counter-sale screen.
//!
//! ## Input
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  6111000000017        bare line: scan / commit (barcode or search text) │
//! │  (empty line)         open search with no filter                        │
//! │  :search <term>       manual search                                     │
//! │  :pick <n>            add result n of the last search                   │
//! │  :clients [term]      list clients                                      │
//! │  :client <id>         select client                                     │
//! │  :noclient            deselect client                                   │
//! │  :row <n> / :unrow    select / deselect cart row n                      │
//! │  :remove              remove the selected row                           │
//! │  :clear               cancel the transaction                            │
//! │  :validate            complete the sale                                 │
//! │  :cart  :help  :quit                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commits run on their own task so a slow catalog never blocks the prompt;
//! a newer commit supersedes one still in flight.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::Local;
use comptoir_core::{CatalogEntry, Client, CompletedSale, Money, SessionSnapshot};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::commands::{cart, client, product, sale};
use crate::error::{ApiError, AppResult};
use crate::state::{AppConfig, CatalogState, SessionState};

const HELP: &str = "\
  <code>            scan or type a barcode, then Enter
  <text>            no such barcode: opens the search list
  :search <term>    search the catalog
  :pick <n>         add result n of the last search
  :clients [term]   list clients
  :client <id>      select a client
  :noclient         deselect the client
  :row <n>          select cart row n (again to deselect)
  :unrow            deselect the row
  :remove           remove the selected row
  :clear            cancel the transaction
  :validate         complete the sale
  :cart             show the cart
  :help             this help
  :quit             leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Commit(String),
    Search(String),
    /// 0-based position in the last search
    Pick(usize),
    Clients(Option<String>),
    Client(String),
    NoClient,
    /// 0-based cart row
    Row(usize),
    Unrow,
    Remove,
    Clear,
    Validate,
    Cart,
    Help,
    Quit,
    Invalid(String),
}

/// Parses a terminal line. Row and result numbers are 1-based on screen.
pub fn parse_line(line: &str) -> ReplCommand {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        return ReplCommand::Commit(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "search" | "s" => ReplCommand::Search(arg.to_string()),
        "pick" | "p" => position(arg).map_or_else(
            || ReplCommand::Invalid("usage: :pick <n>".to_string()),
            ReplCommand::Pick,
        ),
        "clients" => ReplCommand::Clients((!arg.is_empty()).then(|| arg.to_string())),
        "client" if !arg.is_empty() => ReplCommand::Client(arg.to_string()),
        "client" => ReplCommand::Invalid("usage: :client <id>".to_string()),
        "noclient" => ReplCommand::NoClient,
        "row" | "r" => position(arg).map_or_else(
            || ReplCommand::Invalid("usage: :row <n>".to_string()),
            ReplCommand::Row,
        ),
        "unrow" => ReplCommand::Unrow,
        "remove" | "rm" => ReplCommand::Remove,
        "clear" => ReplCommand::Clear,
        "validate" | "v" => ReplCommand::Validate,
        "cart" => ReplCommand::Cart,
        "help" | "h" | "?" => ReplCommand::Help,
        "quit" | "q" | "exit" => ReplCommand::Quit,
        other => ReplCommand::Invalid(format!("unknown command ':{}', try :help", other)),
    }
}

/// "3" → Some(2); "0" or garbage → None.
fn position(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok()?.checked_sub(1)
}

/// The terminal loop and its state.
pub struct Repl {
    config: Arc<AppConfig>,
    session: SessionState,
    catalog: Arc<CatalogState>,
}

impl Repl {
    pub fn new(config: AppConfig, session: SessionState, catalog: CatalogState) -> Self {
        Repl {
            config: Arc::new(config),
            session,
            catalog: Arc::new(catalog),
        }
    }

    /// Reads stdin until EOF or `:quit`.
    pub async fn run(self) -> AppResult<()> {
        println!("{} - vente comptoir (:help for commands)", self.config.store.name);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let command = parse_line(&line);
            debug!(?command, "Input");
            if command == ReplCommand::Quit {
                break;
            }
            self.execute(command).await;
        }

        self.catalog.resolver().cancel_pending();
        info!("Counter closed");
        Ok(())
    }

    async fn execute(&self, command: ReplCommand) {
        let config = &self.config;
        let output = match command {
            ReplCommand::Commit(input) => {
                self.spawn_commit(input);
                return;
            }
            ReplCommand::Search(term) => product::open_search(&self.catalog, &term)
                .await
                .map(|r| render_candidates(config, r.filter.as_deref(), &r.candidates)),
            ReplCommand::Pick(position) => {
                product::pick_from_search(&self.session, &self.catalog, position)
                    .map(|s| render_session(config, &s))
            }
            ReplCommand::Clients(term) => Ok(render_clients(
                config,
                &client::list_clients(&self.catalog, term.as_deref()),
            )),
            ReplCommand::Client(id) => client::select_client(&self.session, &self.catalog, &id)
                .map(|s| render_session(config, &s)),
            ReplCommand::NoClient => {
                client::deselect_client(&self.session).map(|s| render_session(config, &s))
            }
            ReplCommand::Row(index) => {
                cart::toggle_row(&self.session, index).map(|s| render_session(config, &s))
            }
            ReplCommand::Unrow => {
                cart::deselect_row(&self.session).map(|s| render_session(config, &s))
            }
            ReplCommand::Remove => {
                cart::remove_selected(&self.session).map(|s| render_session(config, &s))
            }
            ReplCommand::Clear => {
                cart::clear_transaction(&self.session).map(|s| render_session(config, &s))
            }
            ReplCommand::Validate => {
                sale::validate_transaction(&self.session).map(|s| render_sale(config, &s))
            }
            ReplCommand::Cart => Ok(render_session(config, &cart::get_session(&self.session))),
            ReplCommand::Help => Ok(HELP.to_string()),
            ReplCommand::Invalid(message) => Err(ApiError::validation(message)),
            ReplCommand::Quit => return,
        };
        println!("{}", render_result(output));
    }

    fn spawn_commit(&self, input: String) {
        let config = Arc::clone(&self.config);
        let session = self.session.clone();
        let catalog = Arc::clone(&self.catalog);

        tokio::spawn(async move {
            let output = product::commit_input(&session, &catalog, &input)
                .await
                .map(|response| match response {
                    product::CommitResponse::Added {
                        designation,
                        session,
                    } => format!("+ {}\n{}", designation, render_session(&config, &session)),
                    product::CommitResponse::Search { filter, candidates } => {
                        render_candidates(&config, filter.as_deref(), &candidates)
                    }
                    product::CommitResponse::Superseded => String::new(),
                });
            let output = render_result(output);
            if !output.is_empty() {
                println!("{}", output);
            }
        });
    }
}

fn render_result(result: Result<String, ApiError>) -> String {
    match result {
        Ok(text) => text,
        Err(err) => format!("! {}", err.message),
    }
}

// =============================================================================
// Rendering
// =============================================================================

pub fn render_session(config: &AppConfig, snapshot: &SessionSnapshot) -> String {
    let money = |m: Money| config.format_currency(m);
    let mut out = String::new();

    if snapshot.items.is_empty() {
        out.push_str("  (cart is empty)\n");
    }
    for (i, item) in snapshot.items.iter().enumerate() {
        let marker = if snapshot.selected_index == Some(i) { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{}{:>3}  {:<40} x{:<3} {:>16}",
            marker,
            i + 1,
            item.designation(),
            item.quantity(),
            money(item.line_total())
        );
    }

    let totals = &snapshot.totals;
    let _ = writeln!(out, "  ----");
    let _ = writeln!(out, "  Sous-total   {:>16}", money(totals.subtotal));
    if !totals.discount_rate.is_zero() {
        let _ = writeln!(
            out,
            "  Remise {:>4}% {:>16}",
            totals.discount_rate.percentage(),
            money(totals.discount)
        );
    }
    let _ = writeln!(out, "  TOTAL        {:>16}", money(totals.total));
    let _ = write!(
        out,
        "  Client: {}",
        snapshot
            .client
            .as_ref()
            .map_or("(aucun)", |c| c.name.as_str())
    );
    out
}

pub fn render_candidates(
    config: &AppConfig,
    filter: Option<&str>,
    candidates: &[CatalogEntry],
) -> String {
    let mut out = match filter {
        Some(filter) => format!("Recherche \"{}\": {} résultat(s)", filter, candidates.len()),
        None => format!("Catalogue: {} produit(s)", candidates.len()),
    };
    for (i, entry) in candidates.iter().enumerate() {
        let _ = write!(
            out,
            "\n{:>4}  {:<40} {:>16}  stock {:>4}  {}",
            i + 1,
            entry.designation,
            config.format_currency(entry.unit_price),
            entry.stock_quantity,
            entry.barcode.as_deref().unwrap_or("-")
        );
    }
    out
}

pub fn render_clients(config: &AppConfig, clients: &[Client]) -> String {
    let mut out = format!("{} client(s)", clients.len());
    for client in clients {
        let _ = write!(
            out,
            "\n  {:<10} {:<30} remise {:>5}%  solde {:>16}  points {}",
            client.id,
            client.name,
            client.discount().percentage(),
            config.format_currency(client.balance),
            client.loyalty_points
        );
    }
    out
}

pub fn render_sale(config: &AppConfig, sale: &CompletedSale) -> String {
    let money = |m: Money| config.format_currency(m);
    let mut out = String::new();

    let _ = writeln!(out, "==== {} ====", config.store.name);
    let _ = writeln!(
        out,
        "Ticket {}  {}",
        sale.ticket_number,
        sale.completed_at
            .with_timezone(&Local)
            .format("%d/%m/%Y %H:%M")
    );
    let _ = writeln!(out, "Client: {}", sale.client.name);
    for item in &sale.items {
        let _ = writeln!(
            out,
            "  {:<40} x{:<3} {:>16}",
            item.designation(),
            item.quantity(),
            money(item.line_total())
        );
    }
    let _ = writeln!(out, "  Sous-total   {:>16}", money(sale.subtotal));
    if !sale.discount.is_zero() {
        let _ = writeln!(out, "  Remise       {:>16}", money(sale.discount));
    }
    let _ = writeln!(out, "  TOTAL        {:>16}", money(sale.total));
    if !sale.included_tax.is_zero() {
        let _ = writeln!(out, "  dont TVA     {:>16}", money(sale.included_tax));
    }
    let _ = write!(out, "Vente validée.");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{catalog_state, session_state};

    #[test]
    fn test_parse_bare_lines_are_commits() {
        assert_eq!(
            parse_line(" 6111000000017 \n"),
            ReplCommand::Commit("6111000000017".to_string())
        );
        assert_eq!(parse_line(""), ReplCommand::Commit(String::new()));
        assert_eq!(
            parse_line("galaxy s24"),
            ReplCommand::Commit("galaxy s24".to_string())
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line(":search dell xps"), ReplCommand::Search("dell xps".to_string()));
        assert_eq!(parse_line(":pick 2"), ReplCommand::Pick(1));
        assert_eq!(parse_line(":row 1"), ReplCommand::Row(0));
        assert_eq!(parse_line(":clients"), ReplCommand::Clients(None));
        assert_eq!(parse_line(":clients atlas"), ReplCommand::Clients(Some("atlas".to_string())));
        assert_eq!(parse_line(":client c-1"), ReplCommand::Client("c-1".to_string()));
        assert_eq!(parse_line(":v"), ReplCommand::Validate);
        assert_eq!(parse_line(":quit"), ReplCommand::Quit);
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        assert!(matches!(parse_line(":row 0"), ReplCommand::Invalid(_)));
        assert!(matches!(parse_line(":pick x"), ReplCommand::Invalid(_)));
        assert!(matches!(parse_line(":client"), ReplCommand::Invalid(_)));
        assert!(matches!(parse_line(":frobnicate"), ReplCommand::Invalid(_)));
    }

    #[tokio::test]
    async fn test_render_session_and_sale() {
        let config = AppConfig::default();
        let session = session_state();
        let catalog = catalog_state();
        product::commit_input(&session, &catalog, "6111000000017").await.unwrap();
        product::commit_input(&session, &catalog, "6111000000024").await.unwrap();
        cart::select_row(&session, 0).unwrap();
        let snapshot = client::select_client(&session, &catalog, "c-1").unwrap();

        let screen = render_session(&config, &snapshot);
        assert!(screen.contains(">  1  Laptop Dell XPS 13"));
        assert!(screen.contains("203 300.00 DA"));
        assert!(screen.contains("Client: Karim Benali"));

        let sale = sale::validate_transaction(&session).unwrap();
        let ticket = render_sale(&config, &sale);
        assert!(ticket.contains("Ticket VC-000001"));
        assert!(ticket.contains("10 700.00 DA"));
    }

    #[test]
    fn test_render_empty_cart() {
        let screen = render_session(&AppConfig::default(), &cart::get_session(&session_state()));
        assert!(screen.contains("(cart is empty)"));
        assert!(screen.contains("Client: (aucun)"));
    }
}

//! # Cart Commands
//!
//! Row selection, removal and cancellation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐  commit / pick  ┌──────────┐  validate_transaction       │
//! │  │  Empty   │────────────────►│ In Cart  │─────────────────────►Empty  │
//! │  └──────────┘                 └────┬─────┘      (sale.rs)              │
//! │       ▲                            │                                    │
//! │       │                       select_row                               │
//! │       │                       remove_selected                          │
//! │       │                            │                                    │
//! │       └──── clear_transaction ─────┘                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use comptoir_core::{Command, SessionSnapshot};
use tracing::debug;

use crate::error::ApiError;
use crate::state::SessionState;

/// Dispatches `command` and returns the resulting snapshot.
pub(crate) fn apply(session: &SessionState, command: Command) -> Result<SessionSnapshot, ApiError> {
    session.with_session_mut(|s| {
        s.dispatch(command)?;
        Ok::<_, ApiError>(s.snapshot())
    })
}

/// Current lines, selection, client and totals.
pub fn get_session(session: &SessionState) -> SessionSnapshot {
    debug!("get_session command");
    session.with_session(|s| s.snapshot())
}

/// Selects the row at `index` (0-based).
pub fn select_row(session: &SessionState, index: usize) -> Result<SessionSnapshot, ApiError> {
    debug!(index, "select_row command");
    apply(session, Command::SelectRow(index))
}

/// Selects the row, or deselects it when it already is selected.
pub fn toggle_row(session: &SessionState, index: usize) -> Result<SessionSnapshot, ApiError> {
    debug!(index, "toggle_row command");
    apply(session, Command::ToggleRow(index))
}

pub fn deselect_row(session: &SessionState) -> Result<SessionSnapshot, ApiError> {
    debug!("deselect_row command");
    apply(session, Command::DeselectRow)
}

/// Removes the selected row.
///
/// ## Errors
/// `CART_ERROR` when no row is selected.
pub fn remove_selected(session: &SessionState) -> Result<SessionSnapshot, ApiError> {
    debug!("remove_selected command");
    apply(session, Command::RemoveSelected)
}

/// Cancels the transaction in progress; the client stays selected.
pub fn clear_transaction(session: &SessionState) -> Result<SessionSnapshot, ApiError> {
    debug!("clear_transaction command");
    apply(session, Command::Clear)
}

//! # Session State
//!
//! The counter-sale session shared by command handlers.
//!
//! ## Thread Safety
//! Wrapped in `Arc<Mutex<T>>`: a spawned barcode lookup and the terminal loop
//! may both reach the session, but only one mutates it at a time. The lock
//! is taken inside synchronous closures, never across an `.await`.

use std::sync::{Arc, Mutex};

use comptoir_core::{CounterSaleSession, TaxRate};

/// Shared handle to the counter-sale session.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<CounterSaleSession>>,
}

impl SessionState {
    /// Opens an empty session.
    pub fn new(tax_rate: TaxRate) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(CounterSaleSession::new(tax_rate))),
        }
    }

    /// Runs `f` with read access to the session.
    ///
    /// ## Panics
    /// Panics if the mutex is poisoned (a previous holder panicked).
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CounterSaleSession) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Runs `f` with write access to the session.
    ///
    /// ## Panics
    /// Panics if the mutex is poisoned (a previous holder panicked).
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CounterSaleSession) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(TaxRate::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comptoir_core::{Client, Command};

    #[test]
    fn test_clones_share_one_session() {
        let state = SessionState::default();
        let other = state.clone();

        other
            .with_session_mut(|s| s.dispatch(Command::SelectClient(Client::divers())))
            .unwrap();

        assert!(state.with_session(|s| s.client_context().is_selected()));
    }
}

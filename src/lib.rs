pub mod api;
pub mod batch;
pub mod config;
pub mod error;
pub mod keywords;
pub mod logging;
pub mod lookup;
pub mod scraper;
pub mod sink;
pub mod tui;
pub mod wiki;

use std::sync::{Arc, Mutex};
use tokio::sync::{oneshot, Notify};

use api::models::ExchangeOutcome;
use wiki::ArticleSource;

/// Application state shared by the exchange handler.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ArticleSource>,
    /// Taken by the first well-formed request; `None` once the exchange is spent.
    pub outcome_tx: Arc<Mutex<Option<oneshot::Sender<ExchangeOutcome>>>>,
    /// Fired when a request claims the exchange.
    pub claimed: Arc<Notify>,
}

impl AppState {
    pub fn new(source: Arc<dyn ArticleSource>, outcome_tx: oneshot::Sender<ExchangeOutcome>) -> Self {
        Self {
            source,
            outcome_tx: Arc::new(Mutex::new(Some(outcome_tx))),
            claimed: Arc::new(Notify::new()),
        }
    }

    /// Claims the right to answer. Only the first caller gets the sender.
    pub fn claim_exchange(&self) -> Option<oneshot::Sender<ExchangeOutcome>> {
        let sender = match self.outcome_tx.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if sender.is_some() {
            self.claimed.notify_one();
        }
        sender
    }
}

//! One-shot request/reply endpoint.
//!
//! The server answers exactly one well-formed request, then shuts down. The
//! wait for that request to arrive is bounded by the configured timeout; a
//! request that arrived in time is always seen through to its reply.

pub mod models;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Notify};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::wiki::ArticleSource;
use crate::AppState;
use models::ExchangeOutcome;
use routes::create_router;

/// Binds the configured address and serves a single exchange.
pub async fn serve_once(config: &Config, source: Arc<dyn ArticleSource>) -> Result<Option<ExchangeOutcome>> {
    let listener = TcpListener::bind(config.exchange_addr).await?;
    serve_once_on(listener, source, config.exchange_timeout).await
}

/// Serves a single exchange on an already bound listener.
///
/// Returns `None` if no request claimed the exchange within `wait`.
pub async fn serve_once_on(
    listener: TcpListener,
    source: Arc<dyn ArticleSource>,
    wait: Duration,
) -> Result<Option<ExchangeOutcome>> {
    let local_addr = listener.local_addr()?;
    let (outcome_tx, outcome_rx) = oneshot::channel();
    let state = AppState::new(source, outcome_tx);
    let app = create_router(state.clone());

    let shutdown = Arc::new(Notify::new());
    let signal = shutdown.clone();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { signal.notified().await })
            .await
    });

    tracing::info!(addr = %local_addr, wait_secs = wait.as_secs(), "waiting for exchange request");

    let arrived = tokio::time::timeout(wait, state.claimed.notified()).await.is_ok();

    // Closing the exchange ourselves settles a request racing the deadline:
    // if the slot is already empty, a handler owns it and will reply.
    let outcome = if !arrived && state.claim_exchange().is_some() {
        tracing::warn!(addr = %local_addr, "no exchange request within {:?}", wait);
        None
    } else {
        match outcome_rx.await {
            Ok(outcome) => Some(outcome),
            Err(_) => {
                tracing::warn!("exchange handler dropped without producing a reply");
                None
            }
        }
    };

    // Graceful shutdown lets the in-flight reply finish before the socket closes.
    shutdown.notify_one();
    server
        .await
        .map_err(|e| AppError::ExchangeError(format!("server task failed: {}", e)))??;

    tracing::info!(addr = %local_addr, "exchange endpoint closed");
    Ok(outcome)
}

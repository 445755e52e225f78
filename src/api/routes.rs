use axum::{
    routing::post,
    Router,
    extract::{Json, State},
};
use chrono::Utc;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;

use crate::api::models::{ExchangeOutcome, ExchangeRequest, NULL_REPLY};
use crate::error::{AppError, Result};
use crate::lookup::{lookup, UNABLE_TO_GENERATE};
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/exchange", post(exchange_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn exchange_handler(
    State(state): State<AppState>,
    Json(req): Json<ExchangeRequest>,
) -> Result<Json<String>> {
    tracing::info!(item_name = %req.item_name, "received exchange request");

    // Malformed names are rejected before the exchange is consumed.
    let keywords = req.keywords()?;

    let outcome_tx = state
        .claim_exchange()
        .ok_or_else(|| AppError::ExchangeError("exchange already served".to_string()))?;

    let text = lookup(state.source.as_ref(), &keywords.primary, &keywords.secondary).await;

    let reply = match &text {
        Some(text) => req.compose_reply(&keywords, text),
        None => {
            tracing::warn!(keywords = %keywords, "{}", UNABLE_TO_GENERATE);
            NULL_REPLY.to_string()
        }
    };
    tracing::info!(found = text.is_some(), "sending exchange reply");

    let outcome = ExchangeOutcome {
        request: req,
        keywords,
        text,
        reply: reply.clone(),
        received_at: Utc::now(),
    };
    if outcome_tx.send(outcome).is_err() {
        tracing::warn!("exchange owner stopped waiting before the reply was ready");
    }

    Ok(Json(reply))
}

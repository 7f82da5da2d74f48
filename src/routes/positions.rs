//! # routes::positions
//!
//! Axum route handlers for the paper position ledger.

use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    ledger::{CloseAllReport, LedgerSummary},
    models::{Environment, Position},
    response::ApiResponse,
    state::SharedState,
};

#[derive(Debug, Serialize)]
pub struct PositionsView {
    pub positions: Vec<Position>,
    /// The ledger only ever holds paper positions.
    pub environment: Environment,
    pub summary: LedgerSummary,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClosePositionBody {
    pub symbol: Option<String>,
    pub side: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageView {
    pub message: String,
}

// ─── GET /api/positions ───────────────────────────────────────────────────────

pub async fn list_positions(State(state): State<SharedState>) -> Json<ApiResponse<PositionsView>> {
    let ledger = state.ledger.read().await;

    Json(ApiResponse::ok(PositionsView {
        positions: ledger.positions().to_vec(),
        environment: Environment::Paper,
        summary: ledger.summary(),
    }))
}

// ─── POST /api/positions ──────────────────────────────────────────────────────

/// Close one position by `(symbol, side)`.
///
/// The body is decoded as JSON whatever `Content-Type` says.
pub async fn close_position(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ApiResponse<MessageView>>, AppError> {
    let body: ClosePositionBody = serde_json::from_slice(&body)?;
    let symbol = body.symbol.as_deref();

    state
        .ledger
        .write()
        .await
        .close_one(symbol, body.side.as_deref())?;

    // Echo the symbol as the caller sent it.
    Ok(Json(ApiResponse::ok(MessageView {
        message: format!("Closed {} position", symbol.unwrap_or_default()),
    })))
}

// ─── DELETE /api/positions ────────────────────────────────────────────────────

pub async fn close_all_positions(
    State(state): State<SharedState>,
) -> Json<ApiResponse<CloseAllReport>> {
    let report = state.ledger.write().await.close_all();
    Json(ApiResponse::ok(report))
}

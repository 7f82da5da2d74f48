//! # routes::settings
//!
//! Paper / live environment switch.  The flag is informational only: no
//! other handler reads it.

use axum::{body::Bytes, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::Environment,
    response::ApiResponse,
    state::SharedState,
};

#[derive(Debug, Deserialize)]
pub struct SetEnvironmentBody {
    pub environment: Option<String>,
}

// ─── GET /api/settings/environment ────────────────────────────────────────────

pub async fn get_environment(State(state): State<SharedState>) -> Json<ApiResponse<Value>> {
    let environment = state.current_environment().await;
    Json(ApiResponse::ok(json!({ "environment": environment })))
}

// ─── POST /api/settings/environment ───────────────────────────────────────────

/// Switch to `paper` or `live`.  Anything else is rejected and the current
/// flag is kept.
pub async fn set_environment(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let body: SetEnvironmentBody = serde_json::from_slice(&body)?;

    let target: Environment = body
        .environment
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(AppError::Validation)?;

    state.switch_environment(target).await;

    Ok(Json(ApiResponse::ok(json!({
        "environment": target,
        "message":     format!("Trading environment switched to {target}"),
    }))))
}

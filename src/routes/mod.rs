//! # routes
//!
//! | Method | Path                          | Handler                          |
//! |--------|-------------------------------|----------------------------------|
//! | GET    | `/api/positions`              | [`positions::list_positions`]    |
//! | POST   | `/api/positions`              | [`positions::close_position`]    |
//! | DELETE | `/api/positions`              | [`positions::close_all_positions`] |
//! | GET    | `/api/settings/environment`   | [`settings::get_environment`]    |
//! | POST   | `/api/settings/environment`   | [`settings::set_environment`]    |
//! | GET    | `/api/signals`                | [`signals::get_signals`]         |
//! | GET    | `/api/webhooks/tradingview`   | [`webhooks::webhook_health`]     |
//! | POST   | `/api/webhooks/tradingview`   | [`webhooks::receive_alert`]      |

use axum::{routing::get, Router};

use crate::state::SharedState;

pub mod positions;
pub mod settings;
pub mod signals;
pub mod webhooks;

/// All API routes with state attached.  Middleware is layered on in `main`.
pub fn api_router(state: SharedState) -> Router {
    Router::new()
        // ── Position Ledger ───────────────────────────────────────────────────
        .route(
            "/api/positions",
            get(positions::list_positions)
                .post(positions::close_position)
                .delete(positions::close_all_positions),
        )
        // ── Environment Switch ────────────────────────────────────────────────
        .route(
            "/api/settings/environment",
            get(settings::get_environment).post(settings::set_environment),
        )
        // ── Signal Ranker ─────────────────────────────────────────────────────
        .route("/api/signals", get(signals::get_signals))
        // ── Webhook Ingestor ──────────────────────────────────────────────────
        .route(
            "/api/webhooks/tradingview",
            get(webhooks::webhook_health).post(webhooks::receive_alert),
        )
        .with_state(state)
}

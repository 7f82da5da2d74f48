//! # routes::signals

use axum::{extract::State, Json};
use chrono::Utc;

use crate::{models::Signal, response::ApiResponse, state::SharedState};

// ─── GET /api/signals ─────────────────────────────────────────────────────────

/// Ranked signals, highest confidence first.  Served from cache while fresh.
pub async fn get_signals(State(state): State<SharedState>) -> Json<ApiResponse<Vec<Signal>>> {
    let signals = state.ranker.write().await.signals(Utc::now());
    Json(ApiResponse::ok(signals))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{app, get, seeded_state};

    #[tokio::test]
    async fn test_signals_ranked_and_cached() {
        let app = app(&seeded_state());

        let (status, first) = get(&app, "/api/signals").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["success"], true);

        let batch = first["data"].as_array().unwrap();
        assert_eq!(batch.len(), 6);
        let confidences: Vec<f64> = batch.iter().map(|s| s["confidence"].as_f64().unwrap()).collect();
        assert!(confidences.windows(2).all(|w| w[0] >= w[1]));
        for s in batch {
            assert!(["BUY", "SELL", "HOLD"].contains(&s["recommendation"].as_str().unwrap()));
            assert!(s["scores"]["tradingview"].is_number());
            assert!(s["timestamp"].is_string());
        }

        let (_, second) = get(&app, "/api/signals").await;
        assert_eq!(first, second);
    }
}

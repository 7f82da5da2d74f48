//! # routes::webhooks
//!
//! TradingView alert receiver.
//!
//! The body is taken as raw bytes so the secret can be checked before any
//! JSON parsing happens.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};

use crate::{
    auth::verify_webhook_secret,
    engine::ingest::ingest,
    error::AppError,
    response::ApiResponse,
    state::SharedState,
};

// ─── POST /api/webhooks/tradingview ───────────────────────────────────────────

pub async fn receive_alert(
    State(state): State<SharedState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    // An undecodable query string simply carries no secret.
    let pairs = query.map(|Query(pairs)| pairs).unwrap_or_default();
    verify_webhook_secret(first_secret(&pairs), &headers, &state.webhook_secret)?;

    let ingested = ingest(&body)?;

    Ok(Json(
        ApiResponse::ok(json!({ "received": true }))
            .with_message(format!("Signal processed: {}", ingested.summary())),
    ))
}

/// The first `secret` pair wins when the parameter is repeated.
fn first_secret(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "secret")
        .map(|(_, value)| value.as_str())
}

// ─── GET /api/webhooks/tradingview ────────────────────────────────────────────

pub async fn webhook_health() -> Json<ApiResponse<Value>> {
    Json(
        ApiResponse::ok(json!({ "status": "ready" }))
            .with_message("TradingView webhook endpoint is active"),
    )
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::auth::SECRET_HEADER;
    use crate::routes::test_support::{app, get, seeded_state, send, TEST_SECRET};

    const VALID: &str = r#"{"ticker":"AAPL","action":"buy","price":189.25,"interval":"5"}"#;

    fn url_with_secret(secret: &str) -> String {
        format!("/api/webhooks/tradingview?secret={secret}")
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(&app(&seeded_state()), "/api/webhooks/tradingview").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ready");
        assert_eq!(body["message"], "TradingView webhook endpoint is active");
    }

    #[tokio::test]
    async fn test_accepts_query_secret() {
        let app = app(&seeded_state());
        let (status, body) = send(&app, Method::POST, &url_with_secret(TEST_SECRET), Some(VALID), &[]).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["received"], true);
        assert_eq!(body["message"], "Signal processed: BUY AAPL");
    }

    #[tokio::test]
    async fn test_repeated_query_secret_uses_first() {
        let app = app(&seeded_state());

        let uri = format!("/api/webhooks/tradingview?secret={TEST_SECRET}&secret=x");
        let (status, body) = send(&app, Method::POST, &uri, Some(VALID), &[]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["received"], true);

        let uri = format!("/api/webhooks/tradingview?secret=x&secret={TEST_SECRET}");
        let (status, _) = send(&app, Method::POST, &uri, Some(VALID), &[]).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_accepts_header_secret_and_folds_close() {
        let app = app(&seeded_state());
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/webhooks/tradingview",
            Some(r#"{"ticker":"ES","action":"close","price":5001}"#),
            &[(SECRET_HEADER, TEST_SECRET)],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Signal processed: SELL ES");
    }

    #[tokio::test]
    async fn test_bad_secret_wins_over_bad_body() {
        let app = app(&seeded_state());
        let cases = [
            ("/api/webhooks/tradingview".to_string(), Some(VALID)),
            (url_with_secret("wrong"), Some(VALID)),
            (url_with_secret("wrong"), Some("{not json")),
            ("/api/webhooks/tradingview".to_string(), Some(r#"{"ticker":1}"#)),
            ("/api/webhooks/tradingview".to_string(), None),
        ];
        for (uri, body) in cases {
            let (status, json) = send(&app, Method::POST, &uri, body, &[]).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri} {body:?}");
            assert_eq!(json["success"], false);
            assert_eq!(json["error"], "Unauthorized");
        }
    }

    #[tokio::test]
    async fn test_good_secret_bad_shape_is_400() {
        let app = app(&seeded_state());
        let (status, json) = send(
            &app,
            Method::POST,
            &url_with_secret(TEST_SECRET),
            Some(r#"{"ticker":"AAPL","action":"hold","price":1}"#),
            &[],
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid payload format");
    }

    #[tokio::test]
    async fn test_good_secret_malformed_json_is_500() {
        let app = app(&seeded_state());
        let (status, json) = send(&app, Method::POST, &url_with_secret(TEST_SECRET), Some("{oops"), &[]).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Failed to process webhook");
    }

    #[tokio::test]
    async fn test_ingest_leaves_ledger_alone() {
        let state = seeded_state();
        let app = app(&state);
        send(&app, Method::POST, &url_with_secret(TEST_SECRET), Some(VALID), &[]).await;

        let ledger = state.ledger.read().await;
        assert_eq!(ledger.positions().len(), 2);
        assert_eq!(ledger.balance(), 100_000.0);
    }
}

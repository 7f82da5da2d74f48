//! # auth — Webhook Shared Secret
//!
//! TradingView cannot sign requests, so the webhook is protected by a shared
//! secret carried either way:
//!
//! ```bash
//! curl -X POST "http://localhost:3000/api/webhooks/tradingview?secret=$SECRET" -d '{...}'
//! curl -X POST -H "x-webhook-secret: $SECRET" http://localhost:3000/api/webhooks/tradingview -d '{...}'
//! ```
//!
//! Either carrier matching `TRADINGVIEW_WEBHOOK_SECRET` exactly is enough.
//! This is the only authentication the backend has.

use axum::http::HeaderMap;
use tracing::warn;

use crate::error::AppError;

pub const SECRET_HEADER: &str = "x-webhook-secret";

/// Accept when the query secret **or** the header secret equals `expected`.
pub fn verify_webhook_secret(
    query_secret: Option<&str>,
    headers: &HeaderMap,
    expected: &str,
) -> Result<(), AppError> {
    let header_secret = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());

    let accepted = [query_secret, header_secret]
        .into_iter()
        .flatten()
        .any(|provided| constant_time_eq(provided.as_bytes(), expected.as_bytes()));

    if accepted {
        Ok(())
    } else {
        warn!(
            query_present  = query_secret.is_some(),
            header_present = header_secret.is_some(),
            "❌ [WEBHOOK] Invalid or missing secret"
        );
        Err(AppError::Unauthorized)
    }
}

/// Constant-time comparison so response timing does not leak the secret.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

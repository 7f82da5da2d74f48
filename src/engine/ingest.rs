//! # engine::ingest
//!
//! **Webhook Ingestor** — turns a raw TradingView webhook body into a
//! [`TradingViewAlert`] and the [`SignalType`] it implies.
//!
//! ## Order of checks
//! ```text
//! 1. shared secret        → 401   (auth::verify_webhook_secret, before any parsing)
//! 2. body is JSON         → 500   (parse_body)
//! 3. body has the shape   → 400   (validate_alert)
//!      ticker: string, action ∈ {buy, sell, close}, price: number
//! ```
//!
//! Ingestion is inert: the alert is logged and acknowledged, nothing in the
//! ledger changes.

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::AppError;
use crate::models::{AlertAction, SignalType, TradingViewAlert};

/// What the webhook handler reports back for an accepted alert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestedAlert {
    pub signal_type: SignalType,
    pub ticker: String,
    pub price: f64,
}

impl IngestedAlert {
    pub fn summary(&self) -> String {
        format!("{} {}", self.signal_type.as_str(), self.ticker)
    }
}

/// Decode the raw body.  Anything that is not JSON is reported as an
/// internal failure with a generic message.
pub fn parse_body(body: &[u8]) -> Result<Value, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::internal("Failed to process webhook", e))
}

/// Check the decoded body has `ticker`, `action` and `price` of the right
/// types.  Optional string fields are kept when they are strings and
/// ignored otherwise.
pub fn validate_alert(body: &Value) -> Result<TradingViewAlert, AppError> {
    let invalid = || AppError::Validation("Invalid payload format".into());
    let obj = body.as_object().ok_or_else(invalid)?;

    let ticker = obj.get("ticker").and_then(Value::as_str).ok_or_else(invalid)?;
    let action = match obj.get("action").and_then(Value::as_str) {
        Some("buy") => AlertAction::Buy,
        Some("sell") => AlertAction::Sell,
        Some("close") => AlertAction::Close,
        _ => return Err(invalid()),
    };
    let price = obj.get("price").and_then(Value::as_f64).ok_or_else(invalid)?;

    let optional = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

    Ok(TradingViewAlert {
        ticker: ticker.to_string(),
        action,
        price,
        time: optional("time"),
        interval: optional("interval"),
        strategy: optional("strategy"),
        message: optional("message"),
    })
}

/// Full body pipeline once the secret has been accepted.
pub fn ingest(body: &[u8]) -> Result<IngestedAlert, AppError> {
    let value = parse_body(body)?;
    let alert = validate_alert(&value)?;
    let signal_type = SignalType::from(alert.action);

    info!(
        signal   = signal_type.as_str(),
        ticker   = %alert.ticker,
        price    = alert.price,
        action   = ?alert.action,
        interval = alert.interval.as_deref().unwrap_or("-"),
        strategy = alert.strategy.as_deref().unwrap_or("-"),
        time     = alert.time.as_deref().unwrap_or("-"),
        note     = alert.message.as_deref().unwrap_or("-"),
        "🔔 [WEBHOOK] TradingView signal: {} {} @ {}",
        signal_type.as_str(),
        alert.ticker,
        alert.price,
    );

    Ok(IngestedAlert {
        signal_type,
        ticker: alert.ticker,
        price: alert.price,
    })
}

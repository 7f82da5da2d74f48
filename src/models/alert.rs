//! # models::alert
//!
//! Defines [`TradingViewAlert`] — the JSON body TradingView posts to
//! `/api/webhooks/tradingview` when an alert fires.
//!
//! Alerts are transient: validated, logged, acknowledged, dropped.

use serde::{Deserialize, Serialize};

/// `action` field of an alert.  Only these three strings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertAction {
    Buy,
    Sell,
    Close,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingViewAlert {
    pub ticker: String,
    pub action: AlertAction,
    pub price: f64,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub interval: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Direction derived from an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalType {
    Buy,
    Sell,
}

impl SignalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Buy => "BUY",
            SignalType::Sell => "SELL",
        }
    }
}

impl From<AlertAction> for SignalType {
    // TODO: give `close` its own signal type once alerts are routed to the ledger.
    fn from(action: AlertAction) -> Self {
        match action {
            AlertAction::Buy => SignalType::Buy,
            AlertAction::Sell | AlertAction::Close => SignalType::Sell,
        }
    }
}

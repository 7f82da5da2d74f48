//! # models::signal
//!
//! Defines [`Signal`] — the per-symbol market read served by `/api/signals` —
//! together with the scoring rules that derive it from three sub-scores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sub-score weights; they sum to 1 so the composite stays in `[0, 1]`.
pub const TWITTER_WEIGHT: f64 = 0.25;
pub const UNUSUAL_WHALES_WEIGHT: f64 = 0.35;
pub const TRADINGVIEW_WEIGHT: f64 = 0.40;

/// Composite strictly above this is a BUY.
pub const BUY_THRESHOLD: f64 = 0.65;
/// Composite strictly below this is a SELL.
pub const SELL_THRESHOLD: f64 = 0.35;

// ─── Recommendation ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl Recommendation {
    /// Pure classification of a composite score.
    pub fn classify(composite: f64) -> Self {
        if composite > BUY_THRESHOLD {
            Recommendation::Buy
        } else if composite < SELL_THRESHOLD {
            Recommendation::Sell
        } else {
            Recommendation::Hold
        }
    }
}

// ─── SubScores ────────────────────────────────────────────────────────────────

/// Three independent reads, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScores {
    pub twitter: f64,
    pub unusual_whales: f64,
    pub tradingview: f64,
}

impl SubScores {
    pub fn composite(&self) -> f64 {
        self.twitter * TWITTER_WEIGHT
            + self.unusual_whales * UNUSUAL_WHALES_WEIGHT
            + self.tradingview * TRADINGVIEW_WEIGHT
    }
}

// ─── Signal ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub recommendation: Recommendation,
    /// `|composite − 0.5| × 2`
    pub confidence: f64,
    pub scores: SubScores,
    pub timestamp: DateTime<Utc>,
}

impl Signal {
    pub fn from_scores(symbol: &str, scores: SubScores, timestamp: DateTime<Utc>) -> Self {
        let composite = scores.composite();
        Self {
            symbol: symbol.to_string(),
            recommendation: Recommendation::classify(composite),
            confidence: ((composite - 0.5).abs() * 2.0).min(1.0),
            scores,
            timestamp,
        }
    }
}

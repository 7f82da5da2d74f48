//! # engine::ranker
//!
//! **Signal Ranker** — scores a fixed symbol set and serves the ranked batch
//! from a short-lived cache.
//!
//! ```text
//! signals(now)
//!   ├─ cache fresh (age ≤ ttl)  → cached batch, verbatim
//!   └─ cache empty / stale      → per symbol: draw sub-scores
//!                                   → composite → recommendation + confidence
//!                                 sort by confidence desc
//!                                 replace batch + generated_at together
//! ```
//!
//! The clock is an argument so freshness can be tested without sleeping.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::engine::scores::ScoreSource;
use crate::models::Signal;

struct SignalBatch {
    generated_at: DateTime<Utc>,
    signals: Vec<Signal>,
}

pub struct SignalRanker {
    symbols: Vec<String>,
    ttl: Duration,
    source: Box<dyn ScoreSource>,
    cache: Option<SignalBatch>,
}

impl SignalRanker {
    pub fn new(symbols: Vec<String>, ttl: Duration, source: Box<dyn ScoreSource>) -> Self {
        Self {
            symbols,
            ttl,
            source,
            cache: None,
        }
    }

    /// The current ranked batch, regenerating it first if it is missing or
    /// older than the freshness window.
    pub fn signals(&mut self, now: DateTime<Utc>) -> Vec<Signal> {
        if let Some(batch) = &self.cache {
            if !self.is_stale(batch.generated_at, now) {
                debug!(generated_at = %batch.generated_at, "Signal cache hit");
                return batch.signals.clone();
            }
        }

        let signals = self.generate(now);
        info!(
            count = signals.len(),
            top   = signals.first().map(|s| s.symbol.as_str()).unwrap_or("-"),
            "📡 Signal batch regenerated"
        );

        self.cache = Some(SignalBatch {
            generated_at: now,
            signals: signals.clone(),
        });
        signals
    }

    fn is_stale(&self, generated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        // A clock that stepped backwards yields a negative age: keep the batch.
        now.signed_duration_since(generated_at)
            .to_std()
            .map(|age| age > self.ttl)
            .unwrap_or(false)
    }

    fn generate(&mut self, now: DateTime<Utc>) -> Vec<Signal> {
        let mut signals: Vec<Signal> = self
            .symbols
            .iter()
            .map(|symbol| Signal::from_scores(symbol, self.source.draw(symbol), now))
            .collect();

        signals.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        signals
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

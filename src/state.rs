//! # state
//!
//! The shared application state, built once at startup and injected into
//! every Axum handler via `axum::extract::State`.
//!
//! Each subsystem sits behind its own `tokio::sync::RwLock`; a mutation
//! (closing positions, regenerating signals, switching environment) happens
//! under a single write guard so requests never interleave inside it.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::engine::ranker::SignalRanker;
use crate::engine::scores::{RandomScoreSource, ScoreSource};
use crate::ledger::PaperLedger;
use crate::models::{Environment, Position};

// ─── AppState ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    // ── Position Ledger ───────────────────────────────────────────────────────
    pub ledger: Arc<RwLock<PaperLedger>>,

    // ── Signal Ranker ─────────────────────────────────────────────────────────
    pub ranker: Arc<RwLock<SignalRanker>>,

    // ── Environment Switch ────────────────────────────────────────────────────
    /// `paper` until someone switches it.  Read by nothing but its own
    /// endpoints.
    pub environment: Arc<RwLock<Environment>>,

    // ── Webhook ───────────────────────────────────────────────────────────────
    pub webhook_secret: Arc<str>,
}

impl AppState {
    pub fn new(config: &AppConfig, positions: Vec<Position>) -> Self {
        let source = RandomScoreSource::new(config.signal_seed);
        Self::with_score_source(config, positions, Box::new(source))
    }

    /// Same as [`AppState::new`] with the signal score source supplied by the
    /// caller.
    pub fn with_score_source(
        config: &AppConfig,
        positions: Vec<Position>,
        source: Box<dyn ScoreSource>,
    ) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(PaperLedger::with_positions(
                config.starting_balance,
                positions,
            ))),
            ranker: Arc::new(RwLock::new(SignalRanker::new(
                config.signal_symbols.clone(),
                config.signal_ttl,
                source,
            ))),
            environment: Arc::new(RwLock::new(Environment::default())),
            webhook_secret: Arc::from(config.webhook_secret.as_str()),
        }
    }

    // ── Helper Methods ────────────────────────────────────────────────────────

    pub async fn current_environment(&self) -> Environment {
        *self.environment.read().await
    }

    /// Overwrite the environment flag, returning the previous value.
    pub async fn switch_environment(&self, target: Environment) -> Environment {
        let mut guard = self.environment.write().await;
        let previous = std::mem::replace(&mut *guard, target);

        if target == Environment::Live {
            warn!("⚠️ Switching to LIVE trading mode");
        }
        info!(from = %previous, to = %target, "🔀 Trading environment changed");

        previous
    }
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

/// Build the state from config, loading any seeded positions.
pub fn build_state(config: &AppConfig) -> anyhow::Result<SharedState> {
    let positions = config.load_seed_positions()?;
    if !positions.is_empty() {
        info!(count = positions.len(), "📥 Paper ledger seeded");
    }
    Ok(Arc::new(AppState::new(config, positions)))
}

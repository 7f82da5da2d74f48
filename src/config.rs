//! # config
//!
//! Runtime configuration, read once from the environment at startup.
//!
//! | Variable                     | Default                    |
//! |------------------------------|----------------------------|
//! | `BIND_ADDR`                  | `0.0.0.0:3000`             |
//! | `TRADINGVIEW_WEBHOOK_SECRET` | `dev-secret` (insecure)    |
//! | `PAPER_STARTING_BALANCE`     | `100000`                   |
//! | `PAPER_POSITIONS_FILE`       | — (ledger starts empty)    |
//! | `SIGNAL_SYMBOLS`             | `ES,NQ,SPY,QQQ,AAPL,NVDA`  |
//! | `SIGNAL_CACHE_TTL_SECS`      | `30`                       |
//! | `SIGNAL_SEED`                | — (entropy seeded)         |

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use crate::models::Position;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_WEBHOOK_SECRET: &str = "dev-secret";
pub const DEFAULT_STARTING_BALANCE: f64 = 100_000.0;
pub const DEFAULT_SIGNAL_SYMBOLS: [&str; 6] = ["ES", "NQ", "SPY", "QQQ", "AAPL", "NVDA"];
pub const DEFAULT_SIGNAL_TTL_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Expected value of the `secret` query param / `x-webhook-secret` header.
    pub webhook_secret: String,
    /// `true` when `webhook_secret` fell back to [`DEFAULT_WEBHOOK_SECRET`].
    pub webhook_secret_is_default: bool,
    pub starting_balance: f64,
    /// JSON array of positions to seed the paper ledger with.
    pub positions_file: Option<PathBuf>,
    pub signal_symbols: Vec<String>,
    pub signal_ttl: Duration,
    pub signal_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            webhook_secret: DEFAULT_WEBHOOK_SECRET.to_string(),
            webhook_secret_is_default: true,
            starting_balance: DEFAULT_STARTING_BALANCE,
            positions_file: None,
            signal_symbols: DEFAULT_SIGNAL_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            signal_ttl: Duration::from_secs(DEFAULT_SIGNAL_TTL_SECS),
            signal_seed: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source; `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let webhook_secret = get("TRADINGVIEW_WEBHOOK_SECRET");
        let signal_symbols = get("SIGNAL_SYMBOLS")
            .map(|raw| parse_symbols(&raw))
            .filter(|symbols| !symbols.is_empty())
            .unwrap_or(defaults.signal_symbols);

        Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            webhook_secret_is_default: webhook_secret.is_none(),
            webhook_secret: webhook_secret.unwrap_or(defaults.webhook_secret),
            starting_balance: get("PAPER_STARTING_BALANCE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.starting_balance),
            positions_file: get("PAPER_POSITIONS_FILE").map(PathBuf::from),
            signal_symbols,
            signal_ttl: get("SIGNAL_CACHE_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.signal_ttl),
            signal_seed: get("SIGNAL_SEED").and_then(|v| v.parse().ok()),
        }
    }

    /// Positions to seed the ledger with; empty when no file is configured.
    pub fn load_seed_positions(&self) -> anyhow::Result<Vec<Position>> {
        match &self.positions_file {
            Some(path) => load_positions(path),
            None => Ok(Vec::new()),
        }
    }
}

fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn load_positions(path: &Path) -> anyhow::Result<Vec<Position>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading positions file {}", path.display()))?;
    let mut positions: Vec<Position> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing positions file {}", path.display()))?;

    for p in &mut positions {
        if p.quantity.is_nan() || p.quantity <= 0.0 {
            anyhow::bail!("position {} {} has non-positive quantity {}", p.symbol, p.side, p.quantity);
        }
        p.symbol = p.symbol.to_uppercase();
    }
    Ok(positions)
}

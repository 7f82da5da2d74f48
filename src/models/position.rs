//! # models::position
//!
//! Defines [`Position`] — one open paper trade held by the ledger — and the
//! [`Side`] it was opened on.
//!
//! Positions are never opened through the HTTP surface.  They are seeded at
//! startup (see [`crate::config::AppConfig::positions_file`]) and only ever
//! leave the ledger by being closed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Environment;

// ─── Side ─────────────────────────────────────────────────────────────────────

/// Which way the paper position was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive parse: only `"BUY"` and `"SELL"` are sides.
impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(format!("unknown side '{other}'")),
        }
    }
}

// ─── Position ─────────────────────────────────────────────────────────────────

/// An open paper position.
///
/// `symbol` is stored upper-case; lookups upper-case the caller's input and
/// compare exactly against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub symbol: String,
    pub side: Side,
    /// Always `> 0` for positions held by the ledger.
    pub quantity: f64,
    pub entry_price: f64,
    pub current_price: f64,
    /// Signed mark-to-market profit / loss.
    pub unrealized_pnl: f64,
    #[serde(default)]
    pub environment: Environment,
}

impl Position {
    #[cfg(test)]
    pub fn new(
        symbol: &str,
        side: Side,
        quantity: f64,
        entry_price: f64,
        current_price: f64,
        unrealized_pnl: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.to_uppercase(),
            side,
            quantity,
            entry_price,
            current_price,
            unrealized_pnl,
            environment: Environment::Paper,
        }
    }

    /// `currentPrice × quantity`
    #[inline]
    pub fn market_value(&self) -> f64 {
        self.current_price * self.quantity
    }

    /// Cash credited to the balance when this position is closed.
    #[inline]
    pub fn settlement_value(&self) -> f64 {
        self.market_value() + self.unrealized_pnl
    }

    #[inline]
    pub fn matches(&self, symbol: &str, side: Side) -> bool {
        self.symbol == symbol && self.side == side
    }
}

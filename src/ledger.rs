//! # ledger — Paper Position Ledger
//!
//! Open paper positions plus a cash balance.
//!
//! ## Accounting
//! Closing a position credits its *settlement value*
//! (`currentPrice × quantity + unrealizedPnl`) to the balance and removes it.
//! Nothing in scope ever debits the balance.
//!
//! [`PaperLedger`] itself is plain synchronous data; `AppState` wraps it in a
//! `RwLock` so each close (lookup → credit → remove) runs under one write
//! guard.

use serde::Serialize;
use tracing::info;

use crate::error::AppError;
use crate::models::{Position, Side};

// ─── Views ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub count: usize,
    /// Σ `currentPrice × quantity`
    pub total_value: f64,
    /// Σ `unrealizedPnl`
    pub total_unrealized_pnl: f64,
    pub paper_balance: f64,
}

/// Result of [`PaperLedger::close_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CloseAllReport {
    pub closed: usize,
    /// Paper settlement cannot fail, so this is always 0.
    pub failed: usize,
}

// ─── Ledger ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PaperLedger {
    positions: Vec<Position>,
    balance: f64,
}

impl PaperLedger {
    pub fn with_positions(starting_balance: f64, positions: Vec<Position>) -> Self {
        Self {
            positions,
            balance: starting_balance,
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    #[cfg(test)]
    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            count: self.positions.len(),
            total_value: self.positions.iter().fold(0.0, |acc, p| acc + p.market_value()),
            total_unrealized_pnl: self.positions.iter().fold(0.0, |acc, p| acc + p.unrealized_pnl),
            paper_balance: self.balance,
        }
    }

    /// Close the first position matching `(symbol, side)`.
    ///
    /// `symbol` is upper-cased before the lookup; `side` must be exactly
    /// `BUY` or `SELL` to match anything.  Blank inputs are a validation
    /// error, no match is `NotFound` and leaves the ledger untouched.
    pub fn close_one(
        &mut self,
        symbol: Option<&str>,
        side: Option<&str>,
    ) -> Result<Position, AppError> {
        let (symbol, side) = match (non_blank(symbol), non_blank(side)) {
            (Some(symbol), Some(side)) => (symbol.to_uppercase(), side),
            _ => {
                return Err(AppError::Validation(
                    "Missing required fields: symbol, side".into(),
                ))
            }
        };

        let index = side
            .parse::<Side>()
            .ok()
            .and_then(|side| self.positions.iter().position(|p| p.matches(&symbol, side)))
            .ok_or_else(|| AppError::NotFound("Position not found".into()))?;

        let position = self.positions.remove(index);
        self.balance += position.settlement_value();

        info!(
            symbol   = %position.symbol,
            side     = %position.side,
            quantity = position.quantity,
            credited = position.settlement_value(),
            balance  = self.balance,
            "📕 Paper position closed"
        );

        Ok(position)
    }

    /// Settle every open position and empty the ledger.
    pub fn close_all(&mut self) -> CloseAllReport {
        let closed = self.positions.len();
        for position in self.positions.drain(..) {
            self.balance += position.settlement_value();
        }

        info!(closed, balance = self.balance, "📕 All paper positions closed");

        CloseAllReport { closed, failed: 0 }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn es_long() -> Position {
        Position::new("ES", Side::Buy, 2.0, 95.0, 100.0, 10.0)
    }

    fn book() -> PaperLedger {
        PaperLedger::with_positions(
            100_000.0,
            vec![
                es_long(),
                Position::new("NQ", Side::Sell, 1.0, 18_000.0, 17_950.0, 50.0),
                Position::new("AAPL", Side::Buy, 10.0, 190.0, 185.0, -50.0),
            ],
        )
    }

    #[test]
    fn test_summary_sums() {
        let ledger = book();
        let s = ledger.summary();
        assert_eq!(s.count, 3);
        assert_eq!(s.total_value, 200.0 + 17_950.0 + 1_850.0);
        assert_eq!(s.total_unrealized_pnl, 10.0 + 50.0 - 50.0);
        assert_eq!(s.paper_balance, 100_000.0);
    }

    #[test]
    fn test_summary_empty() {
        let s = PaperLedger::with_positions(100_000.0, vec![]).summary();
        assert_eq!(s.count, 0);
        assert_eq!(s.total_value, 0.0);
        assert_eq!(s.total_unrealized_pnl, 0.0);
    }

    #[test]
    fn test_close_one_lowercase_symbol() {
        let mut ledger = PaperLedger::with_positions(100_000.0, vec![es_long()]);
        let closed = ledger.close_one(Some("es"), Some("BUY")).unwrap();
        assert_eq!(closed.symbol, "ES");
        assert_eq!(ledger.balance(), 100_210.0);
        assert!(ledger.positions().is_empty());
    }

    #[test]
    fn test_close_one_preserves_order_of_rest() {
        let mut ledger = book();
        ledger.close_one(Some("NQ"), Some("SELL")).unwrap();
        let symbols: Vec<&str> = ledger.positions().iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["ES", "AAPL"]);
        assert_eq!(ledger.balance(), 100_000.0 + 17_950.0 + 50.0);
    }

    #[test]
    fn test_close_one_first_duplicate_only() {
        let mut first = es_long();
        first.current_price = 101.0;
        let second = es_long();
        let mut ledger = PaperLedger::with_positions(0.0, vec![first.clone(), second.clone()]);

        let closed = ledger.close_one(Some("ES"), Some("BUY")).unwrap();
        assert_eq!(closed.id, first.id);
        assert_eq!(ledger.positions().len(), 1);
        assert_eq!(ledger.positions()[0].id, second.id);
        assert_eq!(ledger.balance(), 101.0 * 2.0 + 10.0);
    }

    #[test]
    fn test_close_one_not_found_leaves_ledger() {
        let mut ledger = book();
        let before = ledger.positions().to_vec();

        for (symbol, side) in [("ES", "SELL"), ("TSLA", "BUY"), ("ES", "buy"), ("ES", "HOLD")] {
            let err = ledger.close_one(Some(symbol), Some(side)).unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)), "{symbol}/{side}");
        }
        assert_eq!(ledger.positions(), before.as_slice());
        assert_eq!(ledger.balance(), 100_000.0);
    }

    #[test]
    fn test_close_one_missing_fields() {
        let mut ledger = book();
        for (symbol, side) in [(None, Some("BUY")), (Some("ES"), None), (Some("  "), Some("BUY")), (None, None)] {
            let err = ledger.close_one(symbol, side).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert_eq!(ledger.positions().len(), 3);
    }

    #[test]
    fn test_close_all_credits_sum() {
        let mut ledger = book();
        let expected = ledger
            .positions()
            .iter()
            .fold(0.0, |acc, p| acc + p.settlement_value());

        let report = ledger.close_all();
        assert_eq!(report, CloseAllReport { closed: 3, failed: 0 });
        assert!(ledger.positions().is_empty());
        assert_eq!(ledger.balance(), 100_000.0 + expected);
    }

    #[test]
    fn test_close_all_credits_each_position_in_turn() {
        let unit = || Position::new("ES", Side::Buy, 1.0, 1.0, 1.0, 0.0);
        let mut ledger = PaperLedger::with_positions(1e16, vec![unit(), unit()]);

        ledger.close_all();
        // 1e16 + 1.0 rounds back to 1e16 at each step; 1e16 + 2.0 would not.
        assert_eq!(ledger.balance(), 1e16);
    }

    #[test]
    fn test_close_all_empty() {
        let mut ledger = PaperLedger::with_positions(5.0, vec![]);
        assert_eq!(ledger.close_all(), CloseAllReport { closed: 0, failed: 0 });
        assert_eq!(ledger.balance(), 5.0);
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::valuation::OpenPosition;

/// Aggregation choices that the caller must make explicitly.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOptions {
    /// Whether the notional trading-cash balance participates in total
    /// equity. Off by default: cash is a display-only operational float,
    /// not part of net worth.
    pub include_cash_in_equity: bool,
}

/// Outcome statistics over the closed-trade log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeStats {
    pub total: usize,
    /// Trades with profit >= 0.
    pub wins: usize,
    pub losses: usize,
    pub winning_profit: Decimal,
    /// Sum of losing profits, kept as a negative sum.
    pub losing_profit: Decimal,
}

/// Top-level portfolio summary consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Cost locked in currently open lots across all assets.
    pub invested_capital: Decimal,
    /// Sum of open-position market values.
    pub current_market_value: Decimal,
    pub fixed_income_value: Decimal,
    pub dividend_income: Decimal,
    /// Notional trading-cash balance; display-only unless opted into equity.
    pub cash: Decimal,
    pub total_equity: Decimal,
    pub total_profit: Decimal,
    pub total_profit_percent: Decimal,
    /// Realized profit summed across all assets.
    pub realized_profit: Decimal,
    pub positions: Vec<OpenPosition>,
    pub trade_stats: TradeStats,
}

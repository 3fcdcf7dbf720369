use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

use crate::constants::is_quantity_significant;
use crate::transactions::TradeSide;

/// A discrete purchased block of an asset, consumed oldest-first on sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    /// Remaining quantity; decreases via sells, never below zero.
    pub quantity: Decimal,
    /// Purchase price plus the per-unit share of that purchase's costs.
    /// Fixed at creation, never recomputed.
    pub net_unit_cost: Decimal,
    pub purchase_date: NaiveDate,
}

/// One audit row per processed transaction, carrying the post-transaction
/// running snapshot of holdings, realized profit and cash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Id of the originating transaction, when it had one.
    pub id: Option<String>,
    /// 1-based position in the date-sorted transaction stream.
    pub index: usize,
    pub date: NaiveDate,
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: Decimal,
    pub price: Decimal,
    pub costs: Decimal,
    /// Per-unit share of this transaction's costs.
    pub unit_cost_share: Decimal,
    /// Price adjusted by the cost share: price + share on buys,
    /// price - share on sells.
    pub net_unit_price: Decimal,
    /// Gross cash flow of the transaction (qty*price +/- costs).
    pub gross_total: Decimal,
    pub category: String,
    /// Asset quantity held after this transaction.
    pub quantity_held: Decimal,
    /// Asset realized profit after this transaction.
    pub realized_profit: Decimal,
    /// Ledger cash balance after this transaction.
    pub cash: Decimal,
}

/// One FIFO lot-match produced by a sell.
///
/// A sell spanning multiple lots produces multiple closed trades, each
/// carrying a pro-rated share of the sell's costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTrade {
    pub symbol: String,
    pub category: String,
    /// Quantity matched against this lot.
    pub quantity: Decimal,
    /// The matched lot's net unit cost.
    pub buy_unit_cost: Decimal,
    pub sell_price: Decimal,
    pub profit_per_unit: Decimal,
    pub profit: Decimal,
    pub buy_date: NaiveDate,
    pub sell_date: NaiveDate,
    /// Share of the sell's costs, pro-rated by matched/total quantity.
    pub costs: Decimal,
}

/// Per-symbol accounting state, owned by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBook {
    pub symbol: String,
    /// Fixed at the first-seen transaction for this symbol.
    pub category: String,
    /// Open lots, oldest first. Sells always consume the front.
    pub open_lots: VecDeque<Lot>,
    /// Sum of open-lot quantities; tracked incrementally during replay.
    pub quantity_held: Decimal,
    pub total_quantity_bought: Decimal,
    pub total_quantity_sold: Decimal,
    /// Cumulative signed profit from closed portions of lots.
    pub realized_profit: Decimal,
    /// Cumulative fee total across all transactions for this asset.
    pub total_costs_paid: Decimal,
    /// Cumulative gross buy cash flow (qty*price + costs); survives full
    /// liquidation for all-time average-price calculations.
    pub total_bought_value: Decimal,
    /// Cumulative gross sell cash flow (qty*price - costs).
    pub total_sold_value: Decimal,
    /// Per-transaction snapshots scoped to this asset.
    pub entries: Vec<LedgerEntry>,
}

impl AssetBook {
    pub fn new(symbol: String, category: String) -> Self {
        AssetBook {
            symbol,
            category,
            open_lots: VecDeque::new(),
            quantity_held: Decimal::ZERO,
            total_quantity_bought: Decimal::ZERO,
            total_quantity_sold: Decimal::ZERO,
            realized_profit: Decimal::ZERO,
            total_costs_paid: Decimal::ZERO,
            total_bought_value: Decimal::ZERO,
            total_sold_value: Decimal::ZERO,
            entries: Vec::new(),
        }
    }

    /// Cost locked in the currently open lots (qty x net unit cost).
    pub fn invested_cost(&self) -> Decimal {
        self.open_lots
            .iter()
            .map(|lot| lot.quantity * lot.net_unit_cost)
            .sum()
    }

    /// Sum of open-lot quantities, recomputed from the queue.
    pub fn open_quantity(&self) -> Decimal {
        self.open_lots.iter().map(|lot| lot.quantity).sum()
    }

    pub fn has_open_position(&self) -> bool {
        is_quantity_significant(&self.quantity_held)
    }
}

/// Full deterministic ledger state produced by one replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    pub assets: HashMap<String, AssetBook>,
    /// Notional trading-cash balance: decreases by (qty*price + costs) on
    /// buys, increases by (qty*price - costs) on sells. Display-only; not a
    /// money-market account.
    pub cash: Decimal,
    /// Append-only audit trail, one entry per processed transaction.
    pub history: Vec<LedgerEntry>,
    /// One entry per FIFO lot-match consumed during sells.
    pub closed_trades: Vec<ClosedTrade>,
}

impl LedgerState {
    pub fn asset(&self, symbol: &str) -> Option<&AssetBook> {
        self.assets.get(symbol)
    }

    /// Sum of realized profit across all assets.
    pub fn realized_profit_total(&self) -> Decimal {
        self.assets.values().map(|a| a.realized_profit).sum()
    }

    /// Cost locked in currently open lots across all assets.
    pub fn invested_capital(&self) -> Decimal {
        self.assets.values().map(AssetBook::invested_cost).sum()
    }
}

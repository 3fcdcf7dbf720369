use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Symbol to current unit price. A symbol missing from the map is valued
/// at zero.
pub type PriceMap = HashMap<String, Decimal>;

/// Valuation of a currently held position (open lots only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPosition {
    pub symbol: String,
    pub category: String,
    /// Sum of open-lot quantities.
    pub quantity: Decimal,
    pub current_price: Decimal,
    /// quantity x current price.
    pub market_value: Decimal,
    /// Cost locked in the open lots (qty x net unit cost).
    pub invested_cost: Decimal,
    pub unrealized_profit: Decimal,
    pub unrealized_percent: Decimal,
    /// invested cost / quantity over the remaining lots.
    pub weighted_average_cost: Decimal,
    pub first_purchase_date: Option<NaiveDate>,
}

/// All-time performance of an asset, including fully exited ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPerformance {
    pub symbol: String,
    pub category: String,
    /// Currently open quantity; zero for fully exited assets.
    pub quantity: Decimal,
    pub current_price: Decimal,
    pub market_value: Decimal,
    pub invested_cost: Decimal,
    pub unrealized_profit: Decimal,
    pub realized_profit: Decimal,
    /// realized + unrealized.
    pub total_profit: Decimal,
    /// Gross buy flow / total quantity bought; survives full liquidation.
    pub average_buy_price: Decimal,
    /// Gross sell flow / total quantity sold; zero if never sold.
    pub average_sell_price: Decimal,
    pub total_return_percent: Decimal,
    pub total_bought_value: Decimal,
    pub total_sold_value: Decimal,
}

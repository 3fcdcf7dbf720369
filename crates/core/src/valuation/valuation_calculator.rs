use rust_decimal::Decimal;

use super::valuation_model::{AssetPerformance, OpenPosition, PriceMap};
use crate::constants::is_quantity_significant;
use crate::ledger::{AssetBook, LedgerState};

fn hundred() -> Decimal {
    Decimal::ONE_HUNDRED
}

/// Division that short-circuits to zero on a near-zero denominator,
/// never producing NaN or infinity.
fn safe_ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() || !is_quantity_significant(&denominator) {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

fn price_for(prices: &PriceMap, symbol: &str) -> Decimal {
    prices.get(symbol).copied().unwrap_or(Decimal::ZERO)
}

fn open_position_for(book: &AssetBook, prices: &PriceMap) -> OpenPosition {
    let quantity = book.open_quantity();
    let invested_cost = book.invested_cost();
    let current_price = price_for(prices, &book.symbol);
    let market_value = quantity * current_price;
    let unrealized_profit = market_value - invested_cost;
    let unrealized_percent = if invested_cost > Decimal::ZERO {
        unrealized_profit / invested_cost * hundred()
    } else {
        Decimal::ZERO
    };

    OpenPosition {
        symbol: book.symbol.clone(),
        category: book.category.clone(),
        quantity,
        current_price,
        market_value,
        invested_cost,
        unrealized_profit,
        unrealized_percent,
        weighted_average_cost: safe_ratio(invested_cost, quantity),
        first_purchase_date: book.open_lots.front().map(|lot| lot.purchase_date),
    }
}

/// Valuation of currently held positions.
///
/// Assets with no significant open quantity are excluded. Sorted descending
/// by market value.
pub fn open_positions(state: &LedgerState, prices: &PriceMap) -> Vec<OpenPosition> {
    let mut positions: Vec<OpenPosition> = state
        .assets
        .values()
        .filter_map(|book| {
            let quantity = book.open_quantity();
            if is_quantity_significant(&quantity) && quantity > Decimal::ZERO {
                Some(open_position_for(book, prices))
            } else {
                None
            }
        })
        .collect();

    positions.sort_by(|a, b| b.market_value.cmp(&a.market_value));
    positions
}

/// All-time performance view, including fully exited assets.
///
/// Sorted descending by total profit.
pub fn asset_performance(state: &LedgerState, prices: &PriceMap) -> Vec<AssetPerformance> {
    let mut performances: Vec<AssetPerformance> = state
        .assets
        .values()
        .map(|book| {
            let quantity = book.open_quantity();
            let invested_cost = book.invested_cost();
            let current_price = price_for(prices, &book.symbol);
            let market_value = quantity * current_price;
            let unrealized_profit = market_value - invested_cost;
            let total_profit = book.realized_profit + unrealized_profit;

            let total_return_percent = if book.total_bought_value > Decimal::ZERO {
                total_profit / book.total_bought_value * hundred()
            } else {
                Decimal::ZERO
            };

            AssetPerformance {
                symbol: book.symbol.clone(),
                category: book.category.clone(),
                quantity,
                current_price,
                market_value,
                invested_cost,
                unrealized_profit,
                realized_profit: book.realized_profit,
                total_profit,
                average_buy_price: safe_ratio(book.total_bought_value, book.total_quantity_bought),
                average_sell_price: safe_ratio(book.total_sold_value, book.total_quantity_sold),
                total_return_percent,
                total_bought_value: book.total_bought_value,
                total_sold_value: book.total_sold_value,
            }
        })
        .collect();

    performances.sort_by(|a, b| b.total_profit.cmp(&a.total_profit));
    performances
}

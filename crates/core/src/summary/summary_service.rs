use rust_decimal::Decimal;

use super::summary_model::{PortfolioSummary, SummaryOptions, TradeStats};
use crate::ledger::LedgerState;
use crate::valuation::{open_positions, PriceMap};

/// Trade-outcome statistics over the closed-trade log.
///
/// A break-even trade counts as a win; the losing sum stays negative.
pub fn trade_stats(state: &LedgerState) -> TradeStats {
    let mut stats = TradeStats::default();
    for trade in &state.closed_trades {
        stats.total += 1;
        if trade.profit >= Decimal::ZERO {
            stats.wins += 1;
            stats.winning_profit += trade.profit;
        } else {
            stats.losses += 1;
            stats.losing_profit += trade.profit;
        }
    }
    stats
}

/// Combines the ledger state with current prices and external totals into
/// the top-level summary.
///
/// `fixed_income_value` and `dividend_income` come from external
/// collaborators (the fixed-income service aggregated over active
/// instruments, and a dividend ledger summed externally).
pub fn summarize(
    state: &LedgerState,
    prices: &PriceMap,
    fixed_income_value: Decimal,
    dividend_income: Decimal,
    options: &SummaryOptions,
) -> PortfolioSummary {
    let positions = open_positions(state, prices);

    // Recomputed from the lots directly, independent of the valuation pass.
    let invested_capital = state.invested_capital();
    let realized_profit = state.realized_profit_total();

    let current_market_value: Decimal = positions.iter().map(|p| p.market_value).sum();

    let mut total_equity = current_market_value + fixed_income_value + dividend_income;
    if options.include_cash_in_equity {
        total_equity += state.cash;
    }

    let total_profit = total_equity - invested_capital + realized_profit;
    let total_profit_percent = if invested_capital > Decimal::ZERO {
        total_profit / invested_capital * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    PortfolioSummary {
        invested_capital,
        current_market_value,
        fixed_income_value,
        dividend_income,
        cash: state.cash,
        total_equity,
        total_profit,
        total_profit_percent,
        realized_profit,
        positions,
        trade_stats: trade_stats(state),
    }
}

use log::{debug, warn};
use rust_decimal::Decimal;

use super::ledger_model::{AssetBook, ClosedTrade, LedgerEntry, LedgerState, Lot};
use crate::constants::{is_quantity_significant, quantity_threshold};
use crate::transactions::{TradeSide, Transaction};

/// Replays a transaction stream into a [`LedgerState`].
///
/// Stateless; one replay per call. Transactions are stable-sorted ascending
/// by date, so same-day transactions process in input order - this is what
/// makes the history and cash running totals deterministic.
#[derive(Debug, Default, Clone)]
pub struct LedgerCalculator {}

impl LedgerCalculator {
    pub fn new() -> Self {
        LedgerCalculator {}
    }

    /// Full deterministic replay. Never fails: malformed rows are dropped
    /// upstream by the normalizer and numeric degeneracies clamp to zero.
    pub fn replay(&self, mut transactions: Vec<Transaction>) -> LedgerState {
        debug!("Replaying {} transactions", transactions.len());

        // Stable sort: ties on the same date keep original input order.
        transactions.sort_by_key(|t| t.date);

        let mut state = LedgerState::default();

        for (position, transaction) in transactions.iter().enumerate() {
            let index = position + 1;
            match transaction.side {
                TradeSide::Buy => Self::process_buy(&mut state, transaction, index),
                TradeSide::Sell => Self::process_sell(&mut state, transaction, index),
            }
        }

        debug!(
            "Replay complete: {} assets, {} history entries, {} closed trades",
            state.assets.len(),
            state.history.len(),
            state.closed_trades.len()
        );
        state
    }

    fn book_for<'a>(state: &'a mut LedgerState, transaction: &Transaction) -> &'a mut AssetBook {
        state
            .assets
            .entry(transaction.symbol.clone())
            .or_insert_with(|| {
                AssetBook::new(transaction.symbol.clone(), transaction.category.clone())
            })
    }

    fn process_buy(state: &mut LedgerState, transaction: &Transaction, index: usize) {
        let quantity = transaction.quantity;
        let price = transaction.price;
        let total_cost = transaction.total_cost();

        let unit_cost_share = if is_quantity_significant(&quantity) {
            total_cost / quantity
        } else {
            Decimal::ZERO
        };
        let net_unit_cost = price + unit_cost_share;
        let gross_total = quantity * price + total_cost;

        state.cash -= gross_total;
        let cash = state.cash;

        let book = Self::book_for(state, transaction);
        book.open_lots.push_back(Lot {
            quantity,
            net_unit_cost,
            purchase_date: transaction.date,
        });
        book.quantity_held += quantity;
        book.total_quantity_bought += quantity;
        book.total_costs_paid += total_cost;
        book.total_bought_value += gross_total;

        let entry = LedgerEntry {
            id: transaction.id.clone(),
            index,
            date: transaction.date,
            symbol: book.symbol.clone(),
            side: TradeSide::Buy,
            quantity,
            price,
            costs: total_cost,
            unit_cost_share,
            net_unit_price: net_unit_cost,
            gross_total,
            category: book.category.clone(),
            quantity_held: book.quantity_held,
            realized_profit: book.realized_profit,
            cash,
        };
        book.entries.push(entry.clone());
        state.history.push(entry);
    }

    fn process_sell(state: &mut LedgerState, transaction: &Transaction, index: usize) {
        let quantity = transaction.quantity;
        if !is_quantity_significant(&quantity) {
            // No state change, no history entry.
            debug!(
                "Discarding sell of insignificant quantity {} for {}",
                quantity, transaction.symbol
            );
            return;
        }

        let price = transaction.price;
        let total_cost = transaction.total_cost();
        // Quantity is known significant here; the division is safe.
        let unit_cost_share = total_cost / quantity;
        let gross_total = quantity * price - total_cost;

        state.cash += gross_total;
        let cash = state.cash;

        let threshold = quantity_threshold();
        let mut remaining = quantity;
        let mut profit = Decimal::ZERO;
        let mut matches: Vec<ClosedTrade> = Vec::new();

        let book = Self::book_for(state, transaction);

        // Greedy FIFO consumption from the head of the open-lot queue.
        while remaining > threshold {
            let Some(lot) = book.open_lots.front_mut() else {
                // Oversell: the queue emptied before the sold quantity did.
                // Clamp to what was available; quantities never go negative.
                warn!(
                    "Sell of {} {} exceeds held quantity; {} left unmatched",
                    quantity, book.symbol, remaining
                );
                break;
            };

            let matched = remaining.min(lot.quantity);
            let profit_per_unit = price - lot.net_unit_cost;
            let match_profit = profit_per_unit * matched;

            matches.push(ClosedTrade {
                symbol: book.symbol.clone(),
                category: book.category.clone(),
                quantity: matched,
                buy_unit_cost: lot.net_unit_cost,
                sell_price: price,
                profit_per_unit,
                profit: match_profit,
                buy_date: lot.purchase_date,
                sell_date: transaction.date,
                costs: total_cost * (matched / quantity),
            });

            profit += match_profit;
            book.quantity_held -= matched;
            remaining -= matched;

            lot.quantity -= matched;
            if lot.quantity <= threshold {
                book.open_lots.pop_front();
            }
        }

        book.total_quantity_sold += quantity;
        book.realized_profit += profit;
        book.total_costs_paid += total_cost;
        book.total_sold_value += gross_total;

        let entry = LedgerEntry {
            id: transaction.id.clone(),
            index,
            date: transaction.date,
            symbol: book.symbol.clone(),
            side: TradeSide::Sell,
            quantity,
            price,
            costs: total_cost,
            unit_cost_share,
            net_unit_price: price - unit_cost_share,
            gross_total,
            category: book.category.clone(),
            quantity_held: book.quantity_held,
            realized_profit: book.realized_profit,
            cash,
        };
        book.entries.push(entry.clone());
        state.history.push(entry);
        state.closed_trades.extend(matches);
    }
}

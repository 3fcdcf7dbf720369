//! Portfolio accounting engine.
//!
//! The crate turns an ordered stream of buy/sell transactions into per-asset
//! cost basis, realized/unrealized profit, closed-trade records and a running
//! cash/history ledger, using FIFO lot accounting. A separate fixed-income
//! module handles day-count accrual with regressive tax withholding.
//!
//! Everything here is pure, synchronous computation: callers supply the
//! transaction list, a current-price map and external totals (fixed income,
//! dividends) and consume the computed state. Persistence, quote fetching and
//! presentation live outside this crate.

pub mod constants;
pub mod errors;

pub mod fixed_income;
pub mod ledger;
pub mod summary;
pub mod transactions;
pub mod valuation;

pub use errors::{Error, Result};
pub use ledger::{LedgerCalculator, LedgerState};
pub use summary::{PortfolioSummary, SummaryOptions};
pub use transactions::{normalize, RawTransaction, TradeSide, Transaction};
pub use valuation::PriceMap;

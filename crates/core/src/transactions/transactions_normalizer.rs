use chrono::{DateTime, NaiveDate};
use log::{debug, warn};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

use super::transactions_model::{
    LooseNumber, RawTransaction, TradeSide, Transaction, TransactionCosts,
};
use crate::constants::{is_quantity_significant, DEFAULT_CATEGORY};

/// Result of a normalization pass.
///
/// Bad rows never abort the batch; they are dropped and counted.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub transactions: Vec<Transaction>,
    pub dropped: usize,
}

fn non_numeric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^0-9,.\-]").expect("static pattern"))
}

/// Parses a locale-formatted numeric string.
///
/// Strips currency symbols and whitespace, then resolves the separator
/// convention: a decimal comma ("1.234,56") has its thousands dots removed
/// and the comma converted to a point; plain "1234.56" passes through.
pub fn parse_locale_decimal(text: &str) -> Option<Decimal> {
    let stripped = non_numeric_pattern().replace_all(text, "");
    if stripped.is_empty() {
        return None;
    }
    let canonical = if stripped.contains(',') {
        stripped.replace('.', "").replace(',', ".")
    } else {
        stripped.into_owned()
    };
    Decimal::from_str(&canonical).ok()
}

/// Coerces a loose numeric field; numeric input passes through unchanged.
pub fn decimal_from_loose(value: Option<&LooseNumber>) -> Option<Decimal> {
    match value {
        Some(LooseNumber::Number(d)) => Some(*d),
        Some(LooseNumber::Text(s)) => parse_locale_decimal(s),
        None => None,
    }
}

/// Parses a transaction date.
///
/// Accepts DD/MM/YYYY (import spreadsheets), YYYY-MM-DD, or an RFC3339
/// timestamp whose date part is taken.
pub fn parse_transaction_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn cost_component(value: Option<&LooseNumber>) -> Decimal {
    decimal_from_loose(value).unwrap_or(Decimal::ZERO)
}

/// Normalizes a single raw row, or explains why it cannot be kept.
fn normalize_row(raw: &RawTransaction) -> Result<Transaction, &'static str> {
    let symbol = raw
        .symbol
        .as_deref()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .ok_or("missing symbol")?;

    let date = raw
        .date
        .as_deref()
        .and_then(parse_transaction_date)
        .ok_or("unresolvable date")?;

    let side = raw
        .side
        .as_deref()
        .and_then(TradeSide::classify)
        .ok_or("unclassifiable side")?;

    let quantity = decimal_from_loose(raw.quantity.as_ref()).ok_or("unparseable quantity")?;
    if !is_quantity_significant(&quantity) || quantity.is_sign_negative() {
        return Err("quantity below tolerance");
    }

    let price = decimal_from_loose(raw.price.as_ref()).unwrap_or(Decimal::ZERO);

    let costs = TransactionCosts {
        brokerage: cost_component(raw.brokerage.as_ref()),
        fees: cost_component(raw.fees.as_ref()),
        taxes: cost_component(raw.taxes.as_ref()),
        withholding: cost_component(raw.withholding.as_ref()),
    };

    let category = raw
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();

    Ok(Transaction {
        id: raw.id.clone(),
        date,
        symbol,
        side,
        quantity,
        price,
        costs,
        category,
    })
}

/// Validates and coerces raw rows into canonical transactions.
///
/// Rows missing a resolvable symbol, date or side, or with a quantity below
/// the significance tolerance, are dropped with a warning and counted in
/// [`NormalizedBatch::dropped`].
pub fn normalize(rows: Vec<RawTransaction>) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    for (row_number, raw) in rows.iter().enumerate() {
        match normalize_row(raw) {
            Ok(transaction) => batch.transactions.push(transaction),
            Err(reason) => {
                warn!(
                    "Dropping transaction row {} ({}): {}",
                    row_number + 1,
                    raw.symbol.as_deref().unwrap_or("?"),
                    reason
                );
                batch.dropped += 1;
            }
        }
    }
    debug!(
        "Normalized {} transactions, dropped {}",
        batch.transactions.len(),
        batch.dropped
    );
    batch
}

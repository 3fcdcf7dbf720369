use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CATEGORY;

/// Trade direction.
///
/// A closed two-variant tag; raw labels are mapped through
/// [`TradeSide::classify`], never compared as strings elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }

    /// Classifies a raw side label.
    ///
    /// Accepts the canonical "BUY"/"SELL" plus broker shorthand: after
    /// trimming and uppercasing, any label containing a 'C' maps to Buy
    /// ("C", "COMPRA") and otherwise any label containing a 'V' maps to Sell
    /// ("V", "VENDA"). The 'C' check runs before the 'V' check. This is a
    /// lenient heuristic inherited from spreadsheet imports, not exact
    /// enumeration matching.
    pub fn classify(raw: &str) -> Option<TradeSide> {
        let label = raw.trim().to_uppercase();
        match label.as_str() {
            "BUY" => Some(TradeSide::Buy),
            "SELL" => Some(TradeSide::Sell),
            s if s.contains('C') => Some(TradeSide::Buy),
            s if s.contains('V') => Some(TradeSide::Sell),
            _ => None,
        }
    }
}

/// Loosely typed numeric field.
///
/// Spreadsheet imports deliver either plain numbers or locale-formatted
/// currency text such as "R$ 1.234,56".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(Decimal),
    Text(String),
}

/// Raw transaction row as delivered by form entry or spreadsheet import.
///
/// Field aliases accept the Portuguese column headers used by the import
/// spreadsheets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "data")]
    pub date: Option<String>,
    #[serde(default, alias = "asset", alias = "ativo")]
    pub symbol: Option<String>,
    #[serde(default, alias = "type", alias = "tipo")]
    pub side: Option<String>,
    #[serde(default, alias = "qtd")]
    pub quantity: Option<LooseNumber>,
    #[serde(default, alias = "preco")]
    pub price: Option<LooseNumber>,
    #[serde(default, alias = "corretagem")]
    pub brokerage: Option<LooseNumber>,
    #[serde(default, alias = "taxas")]
    pub fees: Option<LooseNumber>,
    #[serde(default, alias = "impostos")]
    pub taxes: Option<LooseNumber>,
    #[serde(default, alias = "irrf")]
    pub withholding: Option<LooseNumber>,
    #[serde(default, alias = "categoria")]
    pub category: Option<String>,
}

/// The four independent fee components of a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCosts {
    pub brokerage: Decimal,
    pub fees: Decimal,
    pub taxes: Decimal,
    pub withholding: Decimal,
}

impl TransactionCosts {
    /// Arithmetic sum of the four components.
    pub fn total(&self) -> Decimal {
        self.brokerage + self.fees + self.taxes + self.withholding
    }
}

/// Canonical transaction record, immutable once normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Option<String>,
    /// Calendar date, the primary ordering key.
    pub date: NaiveDate,
    /// Asset identifier, case/whitespace-normalized.
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: Decimal,
    /// Unit price; may be zero.
    pub price: Decimal,
    pub costs: TransactionCosts,
    /// Free-text grouping label.
    pub category: String,
}

impl Transaction {
    /// Convenience constructor with zero costs and the default category.
    pub fn new(
        date: NaiveDate,
        symbol: &str,
        side: TradeSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Transaction {
            id: None,
            date,
            symbol: symbol.to_string(),
            side,
            quantity,
            price,
            costs: TransactionCosts::default(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    pub fn with_costs(mut self, costs: TransactionCosts) -> Self {
        self.costs = costs;
        self
    }

    /// Combined fee total for this transaction.
    pub fn total_cost(&self) -> Decimal {
        self.costs.total()
    }
}

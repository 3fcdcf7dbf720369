use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Fixed-income instrument kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentKind {
    /// Bank certificate of deposit, yields a contracted percentage of CDI.
    Cdb,
    /// Real-estate credit note; CDI-indexed like a CDB but tax-exempt.
    Lci,
    /// Agribusiness credit note; CDI-indexed like a CDB but tax-exempt.
    Lca,
    /// Treasury bond tracking the Selic rate.
    TreasurySelic,
    /// Treasury bond paying inflation (IPCA) plus a contracted spread.
    TreasuryIpca,
    /// Treasury bond with a rate fixed at purchase.
    TreasuryPrefixed,
}

impl InstrumentKind {
    /// LCI/LCA income is exempt from withholding tax.
    pub fn is_tax_exempt(&self) -> bool {
        matches!(self, InstrumentKind::Lci | InstrumentKind::Lca)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentKind::Cdb => "CDB",
            InstrumentKind::Lci => "LCI",
            InstrumentKind::Lca => "LCA",
            InstrumentKind::TreasurySelic => "Tesouro Selic",
            InstrumentKind::TreasuryIpca => "Tesouro IPCA+",
            InstrumentKind::TreasuryPrefixed => "Tesouro Prefixado",
        }
    }
}

/// Annual reference rates in percent, updatable by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRates {
    pub cdi: Decimal,
    pub selic: Decimal,
    pub ipca: Decimal,
}

impl Default for ReferenceRates {
    fn default() -> Self {
        ReferenceRates {
            cdi: dec!(11.65),
            selic: dec!(11.75),
            ipca: dec!(4.62),
        }
    }
}

/// Lifecycle of an instrument. The transition is one-way: once redeemed, an
/// instrument never becomes active again and accrues only up to the
/// redemption date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentStatus {
    Active,
    Redeemed { redeemed_on: NaiveDate },
}

/// A fixed-income position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: String,
    pub name: String,
    pub kind: InstrumentKind,
    pub principal: Decimal,
    /// Meaning depends on the kind: percent of CDI for CDB/LCI/LCA, spread
    /// over IPCA for IPCA+ bonds, the full annual rate for prefixed bonds.
    /// Ignored for Selic trackers.
    pub contracted_rate: Decimal,
    pub start_date: NaiveDate,
    pub maturity_date: Option<NaiveDate>,
    pub institution: Option<String>,
    pub notes: Option<String>,
    pub status: InstrumentStatus,
}

impl Instrument {
    pub fn is_active(&self) -> bool {
        self.status == InstrumentStatus::Active
    }

    /// The date accrual runs to: the redemption date once redeemed,
    /// otherwise the supplied valuation date.
    pub fn accrual_end(&self, as_of: NaiveDate) -> NaiveDate {
        match self.status {
            InstrumentStatus::Active => as_of,
            InstrumentStatus::Redeemed { redeemed_on } => redeemed_on,
        }
    }
}

/// Input for registering a new instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInstrument {
    /// Defaults to "<kind> - <start date>" when omitted.
    pub name: Option<String>,
    pub kind: InstrumentKind,
    pub principal: Decimal,
    pub contracted_rate: Decimal,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub maturity_date: Option<NaiveDate>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Accrued figures for one instrument at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualResult {
    pub gross_yield: Decimal,
    pub withholding_tax: Decimal,
    pub iof: Decimal,
    pub net_yield: Decimal,
    /// principal + net yield.
    pub net_total: Decimal,
    pub net_return_percent: Decimal,
    /// The effective annual rate used for compounding, in percent.
    pub effective_annual_rate_percent: Decimal,
}

/// An instrument together with its accrued figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentValuation {
    #[serde(flatten)]
    pub instrument: Instrument,
    pub elapsed_days: i64,
    #[serde(flatten)]
    pub accrual: AccrualResult,
}

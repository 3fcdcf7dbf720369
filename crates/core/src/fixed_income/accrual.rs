use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use super::fixed_income_model::{AccrualResult, InstrumentKind, ReferenceRates};
use crate::constants::BUSINESS_DAYS_PER_YEAR;

/// IOF percentage of gross yield for redemptions within the first 30 days,
/// indexed by day of holding (day 1 first). From day 30 on, IOF is zero.
const IOF_REGRESSIVE_PERCENT: [u32; 30] = [
    96, 93, 90, 86, 83, 80, 76, 73, 70, 66, // days 1-10
    63, 60, 56, 53, 50, 46, 43, 40, 36, 33, // days 11-20
    30, 26, 23, 20, 16, 13, 10, 6, 3, 0, // days 21-30
];

/// Elapsed calendar days between two dates, order-insensitive.
///
/// Display/day-count uses calendar days; compounding annualizes over 252
/// business days regardless. That mismatch is the market convention and is
/// intentional.
pub fn elapsed_days(start: NaiveDate, as_of: NaiveDate) -> i64 {
    (as_of - start).num_days().abs()
}

/// Regressive withholding (IR) rate keyed by elapsed days.
pub fn withholding_rate(days: i64) -> Decimal {
    if days <= 180 {
        dec!(0.225)
    } else if days <= 360 {
        dec!(0.20)
    } else if days <= 720 {
        dec!(0.175)
    } else {
        dec!(0.15)
    }
}

/// Withholding tax due on a gross yield after `days` of holding.
pub fn withholding_tax(gross_yield: Decimal, days: i64) -> Decimal {
    gross_yield * withholding_rate(days)
}

/// IOF due on a gross yield after `days` of holding.
///
/// Applies only within the first 30 days: day 1 pays 96% of the yield,
/// decreasing to 0% at day 30.
pub fn iof(gross_yield: Decimal, days: i64) -> Decimal {
    if days >= 30 {
        return Decimal::ZERO;
    }
    let index = days.saturating_sub(1).clamp(0, 29) as usize;
    let rate = Decimal::from(IOF_REGRESSIVE_PERCENT[index]) / Decimal::ONE_HUNDRED;
    gross_yield * rate
}

/// The effective annual rate (as a fraction, not percent) for a kind.
pub fn effective_annual_rate(
    kind: InstrumentKind,
    contracted_rate: Decimal,
    rates: &ReferenceRates,
) -> Decimal {
    let hundred = Decimal::ONE_HUNDRED;
    match kind {
        InstrumentKind::Cdb | InstrumentKind::Lci | InstrumentKind::Lca => {
            (rates.cdi / hundred) * (contracted_rate / hundred)
        }
        // Pure Selic tracking; the contracted rate is ignored.
        InstrumentKind::TreasurySelic => rates.selic / hundred,
        InstrumentKind::TreasuryIpca => (rates.ipca + contracted_rate) / hundred,
        InstrumentKind::TreasuryPrefixed => contracted_rate / hundred,
    }
}

/// Gross yield of `principal` compounded at `annual_rate` (fraction) over
/// `days` calendar days, annualized on the 252 business-day base.
pub fn gross_yield(principal: Decimal, annual_rate: Decimal, days: i64) -> Decimal {
    if days <= 0 || principal.is_zero() {
        return Decimal::ZERO;
    }
    let exponent = Decimal::from(days) / Decimal::from(BUSINESS_DAYS_PER_YEAR);
    principal * ((Decimal::ONE + annual_rate).powd(exponent) - Decimal::ONE)
}

/// Full accrual for one instrument position.
///
/// LCI/LCA are tax-exempt: withholding is forced to zero and only IOF is
/// deducted from the gross yield.
pub fn accrue(
    kind: InstrumentKind,
    principal: Decimal,
    contracted_rate: Decimal,
    days: i64,
    rates: &ReferenceRates,
) -> AccrualResult {
    let annual_rate = effective_annual_rate(kind, contracted_rate, rates);
    let gross = gross_yield(principal, annual_rate, days);

    let tax = if kind.is_tax_exempt() {
        Decimal::ZERO
    } else {
        withholding_tax(gross, days)
    };
    let iof_due = iof(gross, days);

    let net_yield = gross - tax - iof_due;
    let net_total = principal + net_yield;
    let net_return_percent = if principal > Decimal::ZERO {
        net_yield / principal * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    AccrualResult {
        gross_yield: gross,
        withholding_tax: tax,
        iof: iof_due,
        net_yield,
        net_total,
        net_return_percent,
        effective_annual_rate_percent: annual_rate * Decimal::ONE_HUNDRED,
    }
}

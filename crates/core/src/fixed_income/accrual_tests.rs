use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixed_income::{
    accrue, effective_annual_rate, elapsed_days, gross_yield, iof, withholding_rate,
    InstrumentKind, ReferenceRates,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn assert_close(actual: Decimal, expected: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff < dec!(0.0001),
        "expected {expected}, got {actual} (diff {diff})"
    );
}

#[test]
fn elapsed_days_counts_calendar_days_order_insensitive() {
    let start = date("2024-01-01");
    let end = date("2024-06-29"); // 180 days later
    assert_eq!(elapsed_days(start, end), 180);
    assert_eq!(elapsed_days(end, start), 180);
    assert_eq!(elapsed_days(start, start), 0);
}

#[test]
fn withholding_brackets_hit_their_boundaries() {
    assert_eq!(withholding_rate(1), dec!(0.225));
    assert_eq!(withholding_rate(180), dec!(0.225));
    assert_eq!(withholding_rate(181), dec!(0.20));
    assert_eq!(withholding_rate(360), dec!(0.20));
    assert_eq!(withholding_rate(361), dec!(0.175));
    assert_eq!(withholding_rate(720), dec!(0.175));
    assert_eq!(withholding_rate(721), dec!(0.15));
    assert_eq!(withholding_rate(3000), dec!(0.15));
}

#[test]
fn iof_decays_from_96_percent_to_zero() {
    let gross = dec!(100);
    assert_eq!(iof(gross, 1), dec!(96));
    assert_eq!(iof(gross, 2), dec!(93));
    assert_eq!(iof(gross, 15), dec!(50));
    assert_eq!(iof(gross, 29), dec!(3));
    assert_eq!(iof(gross, 30), Decimal::ZERO);
    assert_eq!(iof(gross, 365), Decimal::ZERO);
}

#[test]
fn effective_rates_per_kind() {
    let rates = ReferenceRates::default();

    // 110% of an 11.65% CDI.
    assert_close(
        effective_annual_rate(InstrumentKind::Cdb, dec!(110), &rates),
        dec!(0.12815),
    );
    // Selic tracker ignores the contracted rate.
    assert_eq!(
        effective_annual_rate(InstrumentKind::TreasurySelic, dec!(150), &rates),
        effective_annual_rate(InstrumentKind::TreasurySelic, Decimal::ZERO, &rates),
    );
    assert_close(
        effective_annual_rate(InstrumentKind::TreasurySelic, Decimal::ZERO, &rates),
        dec!(0.1175),
    );
    // IPCA+ adds the spread to inflation.
    assert_close(
        effective_annual_rate(InstrumentKind::TreasuryIpca, dec!(6), &rates),
        dec!(0.1062),
    );
    assert_close(
        effective_annual_rate(InstrumentKind::TreasuryPrefixed, dec!(10.5), &rates),
        dec!(0.105),
    );
}

#[test]
fn one_full_business_year_compounds_to_the_annual_rate() {
    // 252 elapsed days over the 252-day base is exactly one period.
    let gross = gross_yield(dec!(10000), dec!(0.1165), 252);
    assert_close(gross, dec!(1165));
}

#[test]
fn gross_yield_is_zero_for_zero_days_or_principal() {
    assert_eq!(gross_yield(dec!(10000), dec!(0.1), 0), Decimal::ZERO);
    assert_eq!(gross_yield(Decimal::ZERO, dec!(0.1), 100), Decimal::ZERO);
}

#[test]
fn cdb_accrual_applies_ir_and_iof() {
    let rates = ReferenceRates::default();
    // Day 10 of a 100%-CDI CDB: IOF at 66%, IR at 22.5%.
    let result = accrue(InstrumentKind::Cdb, dec!(10000), dec!(100), 10, &rates);

    assert!(result.gross_yield > Decimal::ZERO);
    assert_close(result.withholding_tax, result.gross_yield * dec!(0.225));
    assert_close(result.iof, result.gross_yield * dec!(0.66));
    assert_close(
        result.net_yield,
        result.gross_yield - result.withholding_tax - result.iof,
    );
    assert_close(result.net_total, dec!(10000) + result.net_yield);
}

#[test]
fn cdb_bracket_changes_between_180_and_181_days() {
    let rates = ReferenceRates::default();
    let at_180 = accrue(InstrumentKind::Cdb, dec!(10000), dec!(100), 180, &rates);
    let at_181 = accrue(InstrumentKind::Cdb, dec!(10000), dec!(100), 181, &rates);

    assert_close(at_180.withholding_tax, at_180.gross_yield * dec!(0.225));
    assert_close(at_181.withholding_tax, at_181.gross_yield * dec!(0.20));
}

#[test]
fn lci_and_lca_are_tax_exempt() {
    let rates = ReferenceRates::default();
    for kind in [InstrumentKind::Lci, InstrumentKind::Lca] {
        let result = accrue(kind, dec!(10000), dec!(95), 400, &rates);
        assert_eq!(result.withholding_tax, Decimal::ZERO);
        assert_eq!(result.iof, Decimal::ZERO); // past day 30
        assert_close(result.net_yield, result.gross_yield);
    }
}

#[test]
fn lci_still_pays_iof_inside_30_days() {
    let rates = ReferenceRates::default();
    let result = accrue(InstrumentKind::Lci, dec!(10000), dec!(95), 10, &rates);
    assert_eq!(result.withholding_tax, Decimal::ZERO);
    assert_close(result.iof, result.gross_yield * dec!(0.66));
    assert_close(result.net_yield, result.gross_yield - result.iof);
}

#[test]
fn long_holdings_settle_at_the_15_percent_bracket() {
    let rates = ReferenceRates::default();
    let result = accrue(InstrumentKind::TreasuryPrefixed, dec!(5000), dec!(12), 900, &rates);
    assert_close(result.withholding_tax, result.gross_yield * dec!(0.15));
    assert_eq!(result.iof, Decimal::ZERO);
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::Error;
use crate::fixed_income::{
    FixedIncomeService, InstrumentKind, InstrumentStatus, NewInstrument, ReferenceRates,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn new_cdb(principal: Decimal, start: &str) -> NewInstrument {
    NewInstrument {
        name: None,
        kind: InstrumentKind::Cdb,
        principal,
        contracted_rate: dec!(110),
        start_date: date(start),
        maturity_date: None,
        institution: Some("Banco Teste".to_string()),
        notes: None,
    }
}

#[test]
fn add_assigns_id_and_default_name() {
    let mut service = FixedIncomeService::new();
    let id = {
        let instrument = service.add(new_cdb(dec!(10000), "2024-01-01")).unwrap();
        assert_eq!(instrument.name, "CDB - 2024-01-01");
        assert_eq!(instrument.status, InstrumentStatus::Active);
        instrument.id.clone()
    };
    assert!(!id.is_empty());
    assert!(service.find(&id).is_ok());
}

#[test]
fn add_rejects_non_positive_principal() {
    let mut service = FixedIncomeService::new();
    let result = service.add(new_cdb(Decimal::ZERO, "2024-01-01"));
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn redeem_is_one_way() {
    let mut service = FixedIncomeService::new();
    let id = service
        .add(new_cdb(dec!(10000), "2024-01-01"))
        .unwrap()
        .id
        .clone();

    service.redeem(&id, date("2024-06-01")).unwrap();
    let again = service.redeem(&id, date("2024-07-01"));
    assert!(matches!(again, Err(Error::AlreadyRedeemed(_))));
}

#[test]
fn redeemed_instruments_stop_accruing() {
    let mut service = FixedIncomeService::new();
    let id = service
        .add(new_cdb(dec!(10000), "2024-01-01"))
        .unwrap()
        .id
        .clone();
    service.redeem(&id, date("2024-06-01")).unwrap();

    let instrument = service.find(&id).unwrap().clone();
    let at_redemption = service.valuation(&instrument, date("2024-06-01"));
    let much_later = service.valuation(&instrument, date("2025-06-01"));

    assert_eq!(at_redemption.elapsed_days, much_later.elapsed_days);
    assert_eq!(at_redemption.accrual, much_later.accrual);
}

#[test]
fn totals_cover_active_instruments_only() {
    let mut service = FixedIncomeService::new();
    let active_id = service
        .add(new_cdb(dec!(10000), "2023-01-01"))
        .unwrap()
        .id
        .clone();
    let redeemed_id = service
        .add(new_cdb(dec!(5000), "2023-01-01"))
        .unwrap()
        .id
        .clone();
    service.redeem(&redeemed_id, date("2023-06-01")).unwrap();

    assert_eq!(service.total_invested(), dec!(10000));

    let as_of = date("2024-01-01");
    let active = service.valuation(&service.find(&active_id).unwrap().clone(), as_of);
    assert_eq!(service.total_value(as_of), active.accrual.net_total);
    assert_eq!(service.total_net_yield(as_of), active.accrual.net_yield);
    assert!(service.total_value(as_of) > dec!(10000));

    // Both still show up in the full valuation list.
    assert_eq!(service.valuations(as_of).len(), 2);
    assert_eq!(service.active_valuations(as_of).len(), 1);
}

#[test]
fn average_return_guards_empty_registry() {
    let service = FixedIncomeService::new();
    assert_eq!(
        service.average_return_percent(date("2024-01-01")),
        Decimal::ZERO
    );
}

#[test]
fn projection_extends_the_holding_period() {
    let mut service = FixedIncomeService::new();
    let id = service
        .add(new_cdb(dec!(10000), "2024-01-01"))
        .unwrap()
        .id
        .clone();

    let as_of = date("2024-03-01");
    let now = service.project(&id, as_of, 0).unwrap();
    let later = service.project(&id, as_of, 180).unwrap();
    assert!(later.gross_yield > now.gross_yield);
}

#[test]
fn remove_unknown_id_errors() {
    let mut service = FixedIncomeService::new();
    assert!(matches!(
        service.remove("nope"),
        Err(Error::InstrumentNotFound(_))
    ));
}

#[test]
fn updated_rates_flow_into_valuations() {
    let mut service = FixedIncomeService::new();
    let id = service
        .add(new_cdb(dec!(10000), "2023-01-01"))
        .unwrap()
        .id
        .clone();
    let as_of = date("2024-01-01");
    let before = service.total_value(as_of);

    service.set_reference_rates(ReferenceRates {
        cdi: dec!(14.00),
        ..ReferenceRates::default()
    });
    let after = service.total_value(as_of);
    assert!(after > before);
    assert!(service.find(&id).is_ok());
}

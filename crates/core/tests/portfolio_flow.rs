//! End-to-end flow: raw rows -> normalizer -> ledger replay -> valuation ->
//! summary, with the fixed-income total supplied by the instrument registry.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use carteira_core::fixed_income::{FixedIncomeService, InstrumentKind, NewInstrument};
use carteira_core::summary::summarize;
use carteira_core::transactions::{normalize, LooseNumber, RawTransaction};
use carteira_core::valuation::PriceMap;
use carteira_core::{LedgerCalculator, SummaryOptions};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn row(date: &str, symbol: &str, side: &str, qty: &str, price: &str) -> RawTransaction {
    RawTransaction {
        date: Some(date.to_string()),
        symbol: Some(symbol.to_string()),
        side: Some(side.to_string()),
        quantity: Some(LooseNumber::Text(qty.to_string())),
        price: Some(LooseNumber::Text(price.to_string())),
        ..Default::default()
    }
}

#[test]
fn raw_rows_flow_into_a_summary() {
    let rows = vec![
        row("10/01/2024", "petr4", "COMPRA", "100", "R$ 30,00"),
        row("15/01/2024", "VALE3", "C", "50", "60"),
        row("10/02/2024", "PETR4", "VENDA", "40", "R$ 35,00"),
        // Broken rows are dropped, not fatal.
        row("not a date", "XXXX3", "C", "10", "10"),
        RawTransaction::default(),
    ];

    let batch = normalize(rows);
    assert_eq!(batch.dropped, 2);
    assert_eq!(batch.transactions.len(), 3);

    let state = LedgerCalculator::new().replay(batch.transactions);

    // PETR4: bought 100 @ 30, sold 40 @ 35 -> realized 200, 60 held.
    let petr = state.asset("PETR4").unwrap();
    assert_eq!(petr.realized_profit, dec!(200));
    assert_eq!(petr.quantity_held, dec!(60));
    assert_eq!(state.history.len(), 3);
    assert_eq!(state.closed_trades.len(), 1);

    // Fixed income: one CDB registered a year ago.
    let mut fixed_income = FixedIncomeService::new();
    fixed_income
        .add(NewInstrument {
            name: None,
            kind: InstrumentKind::Cdb,
            principal: dec!(10000),
            contracted_rate: dec!(100),
            start_date: date("2023-03-01"),
            maturity_date: None,
            institution: None,
            notes: None,
        })
        .unwrap();
    let as_of = date("2024-03-01");
    let fixed_income_value = fixed_income.total_value(as_of);
    assert!(fixed_income_value > dec!(10000));

    let prices: PriceMap = [
        ("PETR4".to_string(), dec!(36)),
        ("VALE3".to_string(), dec!(58)),
    ]
    .into_iter()
    .collect();

    let summary = summarize(
        &state,
        &prices,
        fixed_income_value,
        dec!(320), // external dividend total
        &SummaryOptions::default(),
    );

    // Open lots: 60 PETR4 @ 30 plus 50 VALE3 @ 60.
    assert_eq!(summary.invested_capital, dec!(1800) + dec!(3000));
    assert_eq!(
        summary.current_market_value,
        dec!(60) * dec!(36) + dec!(50) * dec!(58)
    );
    assert_eq!(
        summary.total_equity,
        summary.current_market_value + fixed_income_value + dec!(320)
    );
    assert_eq!(summary.realized_profit, dec!(200));
    assert_eq!(summary.trade_stats.total, 1);
    assert_eq!(summary.trade_stats.wins, 1);

    // Cash moved but stayed out of equity.
    assert_eq!(summary.cash, dec!(-3000) - dec!(3000) + dec!(1400));
    assert!(summary.total_equity > Decimal::ZERO);
}

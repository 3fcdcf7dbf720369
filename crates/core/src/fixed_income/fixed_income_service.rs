use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::accrual::{accrue, elapsed_days};
use super::fixed_income_model::{
    AccrualResult, Instrument, InstrumentStatus, InstrumentValuation, NewInstrument,
    ReferenceRates,
};
use crate::errors::{Error, Result};

/// In-memory registry of fixed-income instruments.
///
/// Held and injected explicitly by the caller; there is no ambient
/// singleton. Persistence, when wanted, happens outside this crate by
/// serializing the instrument list.
#[derive(Debug, Clone, Default)]
pub struct FixedIncomeService {
    instruments: Vec<Instrument>,
    reference_rates: ReferenceRates,
}

impl FixedIncomeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rates(reference_rates: ReferenceRates) -> Self {
        FixedIncomeService {
            instruments: Vec::new(),
            reference_rates,
        }
    }

    pub fn reference_rates(&self) -> &ReferenceRates {
        &self.reference_rates
    }

    /// Replaces the reference rates used for subsequent valuations.
    pub fn set_reference_rates(&mut self, rates: ReferenceRates) {
        self.reference_rates = rates;
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Registers a new instrument and returns it.
    pub fn add(&mut self, new: NewInstrument) -> Result<&Instrument> {
        if new.principal <= Decimal::ZERO {
            return Err(Error::InvalidInput(format!(
                "Instrument principal must be positive, got {}",
                new.principal
            )));
        }

        let name = new
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("{} - {}", new.kind.as_str(), new.start_date));

        let instrument = Instrument {
            id: Uuid::new_v4().to_string(),
            name,
            kind: new.kind,
            principal: new.principal,
            contracted_rate: new.contracted_rate,
            start_date: new.start_date,
            maturity_date: new.maturity_date,
            institution: new.institution,
            notes: new.notes,
            status: InstrumentStatus::Active,
        };
        debug!("Registered instrument {} ({})", instrument.name, instrument.id);
        let id = instrument.id.clone();
        self.instruments.push(instrument);
        self.find(&id)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Instrument> {
        self.instruments
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| Error::InstrumentNotFound(id.to_string()))
    }

    pub fn find(&self, id: &str) -> Result<&Instrument> {
        self.instruments
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| Error::InstrumentNotFound(id.to_string()))
    }

    /// Marks an instrument redeemed. One-way: a redeemed instrument cannot
    /// be redeemed again.
    pub fn redeem(&mut self, id: &str, redeemed_on: NaiveDate) -> Result<&Instrument> {
        let instrument = self.find_mut(id)?;
        if !instrument.is_active() {
            return Err(Error::AlreadyRedeemed(id.to_string()));
        }
        instrument.status = InstrumentStatus::Redeemed { redeemed_on };
        Ok(&*instrument)
    }

    /// Removes an instrument from the registry.
    pub fn remove(&mut self, id: &str) -> Result<Instrument> {
        let index = self
            .instruments
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| Error::InstrumentNotFound(id.to_string()))?;
        Ok(self.instruments.remove(index))
    }

    /// Valuation of a single instrument as of `as_of`.
    ///
    /// Redeemed instruments accrue only up to their redemption date.
    pub fn valuation(&self, instrument: &Instrument, as_of: NaiveDate) -> InstrumentValuation {
        let days = elapsed_days(instrument.start_date, instrument.accrual_end(as_of));
        let accrual = accrue(
            instrument.kind,
            instrument.principal,
            instrument.contracted_rate,
            days,
            &self.reference_rates,
        );
        InstrumentValuation {
            instrument: instrument.clone(),
            elapsed_days: days,
            accrual,
        }
    }

    /// Valuations of every registered instrument.
    pub fn valuations(&self, as_of: NaiveDate) -> Vec<InstrumentValuation> {
        self.instruments
            .iter()
            .map(|i| self.valuation(i, as_of))
            .collect()
    }

    /// Valuations of active instruments only.
    pub fn active_valuations(&self, as_of: NaiveDate) -> Vec<InstrumentValuation> {
        self.instruments
            .iter()
            .filter(|i| i.is_active())
            .map(|i| self.valuation(i, as_of))
            .collect()
    }

    /// Principal currently applied across active instruments.
    pub fn total_invested(&self) -> Decimal {
        self.instruments
            .iter()
            .filter(|i| i.is_active())
            .map(|i| i.principal)
            .sum()
    }

    /// Current value (principal + net yield) across active instruments.
    /// This is the fixed-income figure the summary aggregator consumes.
    pub fn total_value(&self, as_of: NaiveDate) -> Decimal {
        self.active_valuations(as_of)
            .iter()
            .map(|v| v.accrual.net_total)
            .sum()
    }

    /// Accumulated net yield across active instruments.
    pub fn total_net_yield(&self, as_of: NaiveDate) -> Decimal {
        self.active_valuations(as_of)
            .iter()
            .map(|v| v.accrual.net_yield)
            .sum()
    }

    /// Weighted average net return over active instruments, in percent.
    pub fn average_return_percent(&self, as_of: NaiveDate) -> Decimal {
        let invested = self.total_invested();
        if invested.is_zero() {
            return Decimal::ZERO;
        }
        self.total_net_yield(as_of) / invested * Decimal::ONE_HUNDRED
    }

    /// Projects an instrument's accrual `days_ahead` calendar days past
    /// `as_of`, at the current reference rates.
    pub fn project(&self, id: &str, as_of: NaiveDate, days_ahead: i64) -> Result<AccrualResult> {
        let instrument = self.find(id)?;
        let days = elapsed_days(instrument.start_date, instrument.accrual_end(as_of)) + days_ahead;
        Ok(accrue(
            instrument.kind,
            instrument.principal,
            instrument.contracted_rate,
            days,
            &self.reference_rates,
        ))
    }
}

//! [`FixedTerm`] [`Contract`] definition.

use std::cmp::Ordering;

use common::{Currency, Money, Period};
use tracing as log;

use crate::domain::{tariff, Bill, Call};
#[cfg(doc)]
use crate::domain::Contract;

use super::{EndDate, Error, Kind, Settlement, StartDate, State};

/// [`Contract`] for a fixed term, with a deposit charged in the first month
/// and a monthly allotment of free minutes.
#[derive(Clone, Debug)]
pub struct FixedTerm {
    /// [`StartDate`] of this [`Contract`], cleared once cancelled.
    start: Option<StartDate>,

    /// [`EndDate`] of the term.
    end: EndDate,

    /// Pricing captured when this [`Contract`] was created.
    tariff: tariff::FixedTerm,

    /// [`Currency`] of the [`Bill`]s.
    currency: Currency,

    /// Free minutes left in the current month.
    free_minutes_left: u64,

    /// Billing [`State`] of this [`Contract`].
    state: State,
}

impl FixedTerm {
    /// Creates a new inactive [`FixedTerm`] [`Contract`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::EndBeforeStart`] if the `end` precedes the `start`.
    pub fn new(
        start: StartDate,
        end: EndDate,
        tariff: tariff::FixedTerm,
        currency: Currency,
    ) -> Result<Self, Error> {
        if end.coerce::<()>() < start.coerce() {
            return Err(Error::EndBeforeStart { start, end });
        }
        Ok(Self {
            start: Some(start),
            end,
            tariff,
            currency,
            free_minutes_left: tariff.free_minutes.into(),
            state: State::Inactive,
        })
    }

    /// Returns [`StartDate`] of this [`Contract`], unless cancelled.
    #[must_use]
    pub fn start(&self) -> Option<StartDate> {
        self.start
    }

    /// Returns [`EndDate`] of the term.
    #[must_use]
    pub fn end(&self) -> EndDate {
        self.end
    }

    /// Returns the number of free minutes left in the current month.
    #[must_use]
    pub fn free_minutes_left(&self) -> u64 {
        self.free_minutes_left
    }

    /// Returns the billing [`State`] of this [`Contract`].
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// See [`Contract::advance_month()`].
    ///
    /// The deposit is charged only when the `period` is the starting one.
    ///
    /// # Errors
    ///
    /// See [`Contract::advance_month()`].
    pub fn advance_month(
        &mut self,
        period: Period,
        mut bill: Bill,
    ) -> Result<Option<Bill>, Error> {
        self.state.check(&bill, self.currency)?;

        self.free_minutes_left = self.tariff.free_minutes.into();
        bill.set_rate(Kind::FixedTerm, self.tariff.per_minute);
        bill.add_fixed_cost(self.tariff.monthly_fee);
        if self.start.map(|s| s.period()) == Some(period) {
            bill.add_fixed_cost(self.tariff.deposit);
            log::debug!("`FixedTerm` deposit charged in `{period}`");
        }
        log::debug!("`FixedTerm` advanced to `{period}`");

        self.state.bind(period, bill, self.currency)
    }

    /// See [`Contract::rate_call()`].
    ///
    /// Free minutes are consumed first. A call exceeding them is split
    /// between free and billed minutes.
    ///
    /// # Errors
    ///
    /// See [`Contract::rate_call()`].
    pub fn rate_call(&mut self, call: &Call) -> Result<(), Error> {
        if self.free_minutes_left == 0 {
            return self.state.charge(call);
        }

        let bill = self.state.bill_mut()?;
        let minutes = call.minutes();
        let free = minutes.min(self.free_minutes_left);
        bill.check_minutes(minutes).map_err(Error::MinutesOverflow)?;
        bill.add_free_minutes(free).map_err(Error::MinutesOverflow)?;
        bill.add_billed_minutes(minutes - free)
            .map_err(Error::MinutesOverflow)?;
        self.free_minutes_left -= free;

        Ok(())
    }

    /// See [`Contract::cancel()`].
    ///
    /// - Before the end month, the deposit is forfeited and the current
    ///   [`Bill`] is owed.
    /// - In the end month, the deposit is returned in full.
    /// - After the end month, the deposit is returned net of the current
    ///   [`Bill`], which may be a [`Settlement::Refund`].
    ///
    /// # Errors
    ///
    /// See [`Contract::cancel()`].
    pub fn cancel(&mut self) -> Result<Settlement, Error> {
        let (period, bill) = self.state.current()?;
        let cost = bill.cost();
        let deposit = Money::new(self.tariff.deposit, self.currency);

        let owed = match period.cmp(&self.end.period()) {
            Ordering::Less => cost,
            Ordering::Equal => deposit,
            Ordering::Greater => deposit.checked_sub(cost).ok_or(
                Error::CurrencyMismatch {
                    expected: self.currency,
                    actual: cost.currency,
                },
            )?,
        };

        self.state.close()?;
        self.start = None;

        let settlement = Settlement::from_signed(owed);
        if settlement.is_refund() {
            log::warn!("`FixedTerm` cancelled with a {settlement}");
        }
        Ok(settlement)
    }
}

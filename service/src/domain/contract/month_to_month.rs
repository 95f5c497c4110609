//! [`MonthToMonth`] [`Contract`] definition.

use common::{Currency, Period};
use tracing as log;

use crate::domain::{tariff, Bill, Call};
#[cfg(doc)]
use crate::domain::Contract;

use super::{Error, Kind, Settlement, StartDate, State};

/// [`Contract`] without a term, charging a flat monthly fee and every minute
/// at a flat rate.
#[derive(Clone, Debug)]
pub struct MonthToMonth {
    /// [`StartDate`] of this [`Contract`], cleared once cancelled.
    start: Option<StartDate>,

    /// Pricing captured when this [`Contract`] was created.
    tariff: tariff::MonthToMonth,

    /// [`Currency`] of the [`Bill`]s.
    currency: Currency,

    /// Billing [`State`] of this [`Contract`].
    state: State,
}

impl MonthToMonth {
    /// Creates a new inactive [`MonthToMonth`] [`Contract`].
    #[must_use]
    pub fn new(
        start: StartDate,
        tariff: tariff::MonthToMonth,
        currency: Currency,
    ) -> Self {
        Self {
            start: Some(start),
            tariff,
            currency,
            state: State::Inactive,
        }
    }

    /// Returns [`StartDate`] of this [`Contract`], unless cancelled.
    #[must_use]
    pub fn start(&self) -> Option<StartDate> {
        self.start
    }

    /// Returns the billing [`State`] of this [`Contract`].
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// See [`Contract::advance_month()`].
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

        bill.add_fixed_cost(self.tariff.monthly_fee);
        bill.set_rate(Kind::MonthToMonth, self.tariff.per_minute);
        log::debug!("`MonthToMonth` advanced to `{period}`");

        self.state.bind(period, bill, self.currency)
    }

    /// See [`Contract::rate_call()`].
    ///
    /// # Errors
    ///
    /// See [`Contract::rate_call()`].
    pub fn rate_call(&mut self, call: &Call) -> Result<(), Error> {
        self.state.charge(call)
    }

    /// See [`Contract::cancel()`].
    ///
    /// # Errors
    ///
    /// See [`Contract::cancel()`].
    pub fn cancel(&mut self) -> Result<Settlement, Error> {
        let (_, bill) = self.state.current()?;
        let owed = bill.cost();

        self.state.close()?;
        self.start = None;

        Ok(Settlement::from_signed(owed))
    }
}

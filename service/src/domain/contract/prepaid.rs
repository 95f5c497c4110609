//! [`Prepaid`] [`Contract`] definition.

use common::{Currency, Money, Period};
use rust_decimal::Decimal;
use tracing as log;

use crate::domain::{tariff, Bill, Call};
#[cfg(doc)]
use crate::domain::Contract;

use super::{Error, Kind, Settlement, StartDate, State};

/// [`Contract`] rated against a prepaid balance, which is automatically
/// topped up on every month transition.
#[derive(Clone, Debug)]
pub struct Prepaid {
    /// [`StartDate`] of this [`Contract`], cleared once cancelled.
    start: Option<StartDate>,

    /// Pricing captured when this [`Contract`] was created.
    tariff: tariff::Prepaid,

    /// Running balance: negative is a credit, positive is owed.
    balance: Money,

    /// Billing [`State`] of this [`Contract`].
    state: State,
}

impl Prepaid {
    /// Creates a new [`Prepaid`] [`Contract`] with the provided
    /// `initial_credit` purchased.
    ///
    /// The [`Contract`] is rated right away, against an empty [`Bill`] of the
    /// starting [`Period`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTopUp`] if the tariff top-up is not positive.
    /// - [`Error::NegativeCredit`] if the `initial_credit` is negative.
    pub fn new(
        start: StartDate,
        initial_credit: Decimal,
        tariff: tariff::Prepaid,
        currency: Currency,
    ) -> Result<Self, Error> {
        if tariff.top_up <= Decimal::ZERO {
            return Err(Error::InvalidTopUp(tariff.top_up));
        }
        if initial_credit < Decimal::ZERO {
            return Err(Error::NegativeCredit(initial_credit));
        }
        Ok(Self {
            start: Some(start),
            tariff,
            balance: Money::new(-initial_credit, currency),
            state: State::Active {
                period: start.period(),
                bill: Bill::new(currency),
            },
        })
    }

    /// Returns [`StartDate`] of this [`Contract`], unless cancelled.
    #[must_use]
    pub fn start(&self) -> Option<StartDate> {
        self.start
    }

    /// Returns the running balance: negative is a credit, positive is owed.
    #[must_use]
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Returns the billing [`State`] of this [`Contract`].
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// See [`Contract::advance_month()`].
    ///
    /// Folds the cost of the previous [`Bill`] into the balance and tops it
    /// up until at least the minimal credit is carried into the `period`.
    ///
    /// # Errors
    ///
    /// See [`Contract::advance_month()`].
    pub fn advance_month(
        &mut self,
        period: Period,
        mut bill: Bill,
    ) -> Result<Option<Bill>, Error> {
        let currency = self.balance.currency;
        self.state.check(&bill, currency)?;

        let (_, previous) = self.state.current()?;
        self.balance = self.balance.checked_add(previous.cost()).ok_or(
            Error::CurrencyMismatch {
                expected: currency,
                actual: previous.currency(),
            },
        )?;

        let floor = -self.tariff.min_credit;
        let mut top_ups = 0_u32;
        while self.balance.amount > floor {
            self.balance.amount -= self.tariff.top_up;
            top_ups += 1;
        }
        if top_ups > 0 {
            log::debug!(
                "`Prepaid` topped up {top_ups} time(s) in `{period}`, \
                 balance is `{}`",
                self.balance,
            );
        }

        bill.set_rate(Kind::Prepaid, self.tariff.per_minute);
        bill.add_fixed_cost(self.balance.amount);
        log::debug!("`Prepaid` advanced to `{period}`");

        self.state.bind(period, bill, currency)
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
    /// A positive balance is owed. Remaining credit is forfeited.
    ///
    /// # Errors
    ///
    /// See [`Contract::cancel()`].
    pub fn cancel(&mut self) -> Result<Settlement, Error> {
        self.state.close()?;
        self.start = None;

        Ok(Settlement::Charge(if self.balance.is_positive() {
            self.balance
        } else {
            Money::zero(self.balance.currency)
        }))
    }
}

//! [`Contract`] definitions.

pub mod fixed_term;
pub mod month_to_month;
pub mod prepaid;

use std::{fmt, mem};

use common::{define_kind, unit, Currency, DateOf, Money, Period};
use derive_more::{Display, Error as StdError, From};
use rust_decimal::Decimal;

use crate::domain::{bill::MinutesOverflow, Bill, Call};
#[cfg(doc)]
use crate::domain::line::Line;

pub use self::{
    fixed_term::FixedTerm, month_to_month::MonthToMonth, prepaid::Prepaid,
};

/// Rate plan of a [`Line`].
#[derive(Clone, Debug, From)]
pub enum Contract {
    #[doc(hidden)]
    MonthToMonth(MonthToMonth),
    #[doc(hidden)]
    FixedTerm(FixedTerm),
    #[doc(hidden)]
    Prepaid(Prepaid),
}

impl Contract {
    /// Returns [`Kind`] of this [`Contract`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::MonthToMonth(_) => Kind::MonthToMonth,
            Self::FixedTerm(_) => Kind::FixedTerm,
            Self::Prepaid(_) => Kind::Prepaid,
        }
    }

    /// Returns [`StartDate`] of this [`Contract`].
    ///
    /// [`None`] is returned once this [`Contract`] is cancelled.
    #[must_use]
    pub fn start(&self) -> Option<StartDate> {
        match self {
            Self::MonthToMonth(c) => c.start(),
            Self::FixedTerm(c) => c.start(),
            Self::Prepaid(c) => c.start(),
        }
    }

    /// Returns [`State`] of this [`Contract`].
    #[must_use]
    pub fn state(&self) -> &State {
        match self {
            Self::MonthToMonth(c) => c.state(),
            Self::FixedTerm(c) => c.state(),
            Self::Prepaid(c) => c.state(),
        }
    }

    /// Returns the [`Bill`] this [`Contract`] is currently bound to.
    #[must_use]
    pub fn bill(&self) -> Option<&Bill> {
        self.state().bill()
    }

    /// Returns the billing [`Period`] this [`Contract`] is currently bound
    /// to.
    #[must_use]
    pub fn period(&self) -> Option<Period> {
        self.state().period()
    }

    /// Indicates whether this [`Contract`] is cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.state(), State::Cancelled { .. })
    }

    /// Advances this [`Contract`] to the provided [`Period`], binding the
    /// provided [`Bill`] and charging the fixed costs of the month onto it.
    ///
    /// Returns the previously bound [`Bill`], if any.
    ///
    /// # Errors
    ///
    /// - [`Error::Cancelled`] if this [`Contract`] is cancelled.
    /// - [`Error::CurrencyMismatch`] if the [`Bill`] is issued in a currency
    ///   other than the tariff one.
    pub fn advance_month(
        &mut self,
        period: Period,
        bill: Bill,
    ) -> Result<Option<Bill>, Error> {
        match self {
            Self::MonthToMonth(c) => c.advance_month(period, bill),
            Self::FixedTerm(c) => c.advance_month(period, bill),
            Self::Prepaid(c) => c.advance_month(period, bill),
        }
    }

    /// Rates the provided [`Call`] onto the currently bound [`Bill`].
    ///
    /// # Errors
    ///
    /// - [`Error::NoCurrentBill`] if no [`Bill`] has been bound yet.
    /// - [`Error::Cancelled`] if this [`Contract`] is cancelled.
    pub fn rate_call(&mut self, call: &Call) -> Result<(), Error> {
        match self {
            Self::MonthToMonth(c) => c.rate_call(call),
            Self::FixedTerm(c) => c.rate_call(call),
            Self::Prepaid(c) => c.rate_call(call),
        }
    }

    /// Cancels this [`Contract`], returning the [`Settlement`] to close the
    /// line with.
    ///
    /// # Errors
    ///
    /// - [`Error::NoCurrentBill`] if no [`Bill`] has been bound yet.
    /// - [`Error::Cancelled`] if this [`Contract`] is cancelled already.
    pub fn cancel(&mut self) -> Result<Settlement, Error> {
        match self {
            Self::MonthToMonth(c) => c.cancel(),
            Self::FixedTerm(c) => c.cancel(),
            Self::Prepaid(c) => c.cancel(),
        }
    }
}

define_kind! {
    #[doc = "Kind of a [`Contract`]."]
    enum Kind {
        #[doc = "[`MonthToMonth`] [`Contract`]."]
        MonthToMonth = 1,

        #[doc = "[`FixedTerm`] [`Contract`]."]
        FixedTerm = 2,

        #[doc = "[`Prepaid`] [`Contract`]."]
        Prepaid = 3,
    }
}

/// Billing state of a [`Contract`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum State {
    /// No [`Bill`] is bound yet.
    #[default]
    Inactive,

    /// A [`Bill`] of the [`Period`] is bound and being rated.
    Active {
        /// [`Period`] the [`Bill`] is issued for.
        period: Period,

        /// [`Bill`] being rated.
        bill: Bill,
    },

    /// The [`Contract`] is cancelled. Terminal.
    Cancelled {
        /// [`Period`] the [`Contract`] was cancelled in.
        period: Period,

        /// Last [`Bill`] of the [`Contract`].
        bill: Bill,
    },
}

impl State {
    /// Returns the bound [`Bill`], if any.
    #[must_use]
    pub fn bill(&self) -> Option<&Bill> {
        match self {
            Self::Inactive => None,
            Self::Active { bill, .. } | Self::Cancelled { bill, .. } => {
                Some(bill)
            }
        }
    }

    /// Returns the bound [`Period`], if any.
    #[must_use]
    pub fn period(&self) -> Option<Period> {
        match self {
            Self::Inactive => None,
            Self::Active { period, .. } | Self::Cancelled { period, .. } => {
                Some(*period)
            }
        }
    }

    /// Returns the [`Period`] and the [`Bill`] being rated.
    pub(crate) fn current(&self) -> Result<(Period, &Bill), Error> {
        match self {
            Self::Inactive => Err(Error::NoCurrentBill),
            Self::Active { period, bill } => Ok((*period, bill)),
            Self::Cancelled { .. } => Err(Error::Cancelled),
        }
    }

    /// Returns the [`Bill`] being rated for mutation.
    pub(crate) fn bill_mut(&mut self) -> Result<&mut Bill, Error> {
        match self {
            Self::Inactive => Err(Error::NoCurrentBill),
            Self::Active { bill, .. } => Ok(bill),
            Self::Cancelled { .. } => Err(Error::Cancelled),
        }
    }

    /// Checks whether the provided [`Bill`] can be bound.
    pub(crate) fn check(
        &self,
        bill: &Bill,
        currency: Currency,
    ) -> Result<(), Error> {
        if matches!(self, Self::Cancelled { .. }) {
            return Err(Error::Cancelled);
        }
        if bill.currency() != currency {
            return Err(Error::CurrencyMismatch {
                expected: currency,
                actual: bill.currency(),
            });
        }
        Ok(())
    }

    /// Binds the provided [`Bill`] of the [`Period`], returning the
    /// previously bound one.
    pub(crate) fn bind(
        &mut self,
        period: Period,
        bill: Bill,
        currency: Currency,
    ) -> Result<Option<Bill>, Error> {
        self.check(&bill, currency)?;
        Ok(match mem::replace(self, Self::Active { period, bill }) {
            Self::Inactive => None,
            Self::Active { bill, .. } | Self::Cancelled { bill, .. } => {
                Some(bill)
            }
        })
    }

    /// Charges every minute of the provided [`Call`] at the [`Bill`] rate.
    pub(crate) fn charge(&mut self, call: &Call) -> Result<(), Error> {
        self.bill_mut()?
            .add_billed_minutes(call.minutes())
            .map_err(Error::MinutesOverflow)
    }

    /// Moves into the [`State::Cancelled`].
    pub(crate) fn close(&mut self) -> Result<(), Error> {
        match mem::take(self) {
            Self::Active { period, bill } => {
                *self = Self::Cancelled { period, bill };
                Ok(())
            }
            Self::Inactive => Err(Error::NoCurrentBill),
            s @ Self::Cancelled { .. } => {
                *self = s;
                Err(Error::Cancelled)
            }
        }
    }
}

/// Amount closing a [`Contract`] upon its cancellation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Settlement {
    /// Customer owes the provider. Never negative.
    Charge(Money),

    /// Provider owes the customer. Stored as a positive magnitude.
    Refund(Money),
}

impl Settlement {
    /// Creates a new [`Settlement`] out of a signed amount, where a negative
    /// one means the provider owes the customer.
    #[must_use]
    pub fn from_signed(amount: Money) -> Self {
        if amount.is_negative() {
            Self::Refund(amount.abs())
        } else {
            Self::Charge(amount)
        }
    }

    /// Returns the signed amount of this [`Settlement`]: positive if the
    /// customer owes, negative if the provider does.
    #[must_use]
    pub fn signed(&self) -> Money {
        match *self {
            Self::Charge(m) => m,
            Self::Refund(m) => -m,
        }
    }

    /// Returns the signed decimal amount of this [`Settlement`].
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.signed().amount
    }

    /// Indicates whether this [`Settlement`] is a [`Settlement::Refund`].
    #[must_use]
    pub fn is_refund(&self) -> bool {
        matches!(self, Self::Refund(_))
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Charge(m) => write!(f, "charge of {m}"),
            Self::Refund(m) => write!(f, "refund of {m}"),
        }
    }
}

/// Error of a [`Contract`] operation.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// No [`Bill`] is bound to the [`Contract`] yet.
    #[display("no `Bill` is bound to the `Contract` yet")]
    NoCurrentBill,

    /// The [`Contract`] is cancelled.
    #[display("`Contract` is cancelled")]
    Cancelled,

    /// [`Bill`] is issued in a currency other than the tariff one.
    #[display("`Bill` is issued in `{actual}`, expected `{expected}`")]
    CurrencyMismatch {
        /// Currency of the tariff.
        expected: Currency,

        /// Currency of the [`Bill`].
        actual: Currency,
    },

    /// [`FixedTerm`] ends before it starts.
    #[display("term ends on `{end}` before it starts on `{start}`")]
    EndBeforeStart {
        /// Start of the term.
        start: StartDate,

        /// End of the term.
        end: EndDate,
    },

    /// [`Prepaid`] top-up is not positive, so it can never restore credit.
    #[display("top-up of `{_0}` is not positive")]
    InvalidTopUp(#[error(not(source))] Decimal),

    /// [`Prepaid`] initial credit is negative.
    #[display("initial credit of `{_0}` is negative")]
    NegativeCredit(#[error(not(source))] Decimal),

    /// [`Call`] minutes cannot be recorded on the [`Bill`].
    #[display("`Call` cannot be rated: {_0}")]
    MinutesOverflow(MinutesOverflow),
}

/// [`DateOf`] when a [`Contract`] starts.
pub type StartDate = DateOf<(Contract, unit::Activation)>;

/// Marker type indicating [`Contract`] expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// [`DateOf`] when a [`Contract`] term ends.
pub type EndDate = DateOf<(Contract, Expiration)>;

//! [`Bill`] definitions.

use common::{Currency, Money};
use derive_more::{Display, Error};
use rust_decimal::Decimal;

use crate::domain::contract;
#[cfg(doc)]
use crate::domain::Contract;

/// Ledger of a single billing month of a single [`Contract`].
///
/// Accumulates fixed costs along with billed and free minutes, and reports
/// the total cost of the month.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bill {
    /// [`Currency`] this [`Bill`] is issued in.
    currency: Currency,

    /// Rate plan this [`Bill`] is charged by, once set.
    kind: Option<contract::Kind>,

    /// Price of a single billed minute.
    per_minute: Decimal,

    /// Sum of the fixed costs. Negative for a prepaid credit.
    fixed_cost: Decimal,

    /// Minutes charged at the `per_minute` rate.
    billed_minutes: u64,

    /// Minutes covered by the plan allotment.
    ///
    /// Together with `billed_minutes` never exceeds [`u64::MAX`].
    free_minutes: u64,
}

impl Bill {
    /// Creates a new empty [`Bill`] in the provided [`Currency`].
    #[must_use]
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            kind: None,
            per_minute: Decimal::ZERO,
            fixed_cost: Decimal::ZERO,
            billed_minutes: 0,
            free_minutes: 0,
        }
    }

    /// Sets the rate plan and the price of a billed minute.
    pub fn set_rate(&mut self, kind: contract::Kind, per_minute: Decimal) {
        self.kind = Some(kind);
        self.per_minute = per_minute;
    }

    /// Adds the provided `amount` to the fixed costs.
    pub fn add_fixed_cost(&mut self, amount: Decimal) {
        self.fixed_cost += amount;
    }

    /// Records the provided `minutes` as billed.
    ///
    /// # Errors
    ///
    /// Returns [`MinutesOverflow`] if the total minutes don't fit into
    /// [`u64`]. This [`Bill`] is left untouched then.
    pub fn add_billed_minutes(
        &mut self,
        minutes: u64,
    ) -> Result<(), MinutesOverflow> {
        self.check_minutes(minutes)?;
        self.billed_minutes += minutes;
        Ok(())
    }

    /// Records the provided `minutes` as free.
    ///
    /// # Errors
    ///
    /// Returns [`MinutesOverflow`] if the total minutes don't fit into
    /// [`u64`]. This [`Bill`] is left untouched then.
    pub fn add_free_minutes(
        &mut self,
        minutes: u64,
    ) -> Result<(), MinutesOverflow> {
        self.check_minutes(minutes)?;
        self.free_minutes += minutes;
        Ok(())
    }

    /// Checks whether the provided `minutes` can be recorded.
    pub(crate) fn check_minutes(
        &self,
        minutes: u64,
    ) -> Result<(), MinutesOverflow> {
        self.total_minutes()
            .checked_add(minutes)
            .map(drop)
            .ok_or(MinutesOverflow { minutes })
    }

    /// Returns the total cost of this [`Bill`].
    #[must_use]
    pub fn cost(&self) -> Money {
        Money::new(
            self.fixed_cost + Decimal::from(self.billed_minutes) * self.per_minute,
            self.currency,
        )
    }

    /// Returns the [`Currency`] of this [`Bill`].
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the rate plan of this [`Bill`], if set.
    #[must_use]
    pub fn kind(&self) -> Option<contract::Kind> {
        self.kind
    }

    /// Returns the price of a billed minute.
    #[must_use]
    pub fn per_minute(&self) -> Money {
        Money::new(self.per_minute, self.currency)
    }

    /// Returns the sum of the fixed costs.
    #[must_use]
    pub fn fixed_cost(&self) -> Money {
        Money::new(self.fixed_cost, self.currency)
    }

    /// Returns the number of billed minutes.
    #[must_use]
    pub fn billed_minutes(&self) -> u64 {
        self.billed_minutes
    }

    /// Returns the number of free minutes.
    #[must_use]
    pub fn free_minutes(&self) -> u64 {
        self.free_minutes
    }

    /// Returns the number of minutes recorded on this [`Bill`].
    #[must_use]
    pub fn total_minutes(&self) -> u64 {
        self.billed_minutes + self.free_minutes
    }
}

/// Error of recording more minutes on a [`Bill`] than it can count.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("cannot record {minutes} more minute(s) on `Bill`")]
pub struct MinutesOverflow {
    /// Minutes that were rejected.
    minutes: u64,
}

#[cfg(test)]
mod spec {
    use common::{Currency, Money};
    use rust_decimal::Decimal;

    use super::{Bill, MinutesOverflow};
    use crate::domain::contract;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn empty_bill_costs_nothing() {
        let bill = Bill::new(Currency::Usd);

        assert_eq!(bill.cost(), Money::zero(Currency::Usd));
        assert_eq!(bill.kind(), None);
        assert_eq!(bill.total_minutes(), 0);
    }

    #[test]
    fn cost_is_fixed_plus_billed_minutes() {
        let mut bill = Bill::new(Currency::Usd);
        bill.set_rate(contract::Kind::FixedTerm, decimal("0.1"));
        bill.add_fixed_cost(decimal("20"));
        bill.add_fixed_cost(decimal("300"));
        bill.add_billed_minutes(15).unwrap();
        bill.add_free_minutes(100).unwrap();

        assert_eq!(bill.cost().amount, decimal("321.5"));
        assert_eq!(bill.fixed_cost().amount, decimal("320"));
        assert_eq!(bill.billed_minutes(), 15);
        assert_eq!(bill.free_minutes(), 100);
        assert_eq!(bill.total_minutes(), 115);
        assert_eq!(bill.kind(), Some(contract::Kind::FixedTerm));
    }

    #[test]
    fn free_minutes_cost_nothing() {
        let mut bill = Bill::new(Currency::Cad);
        bill.set_rate(contract::Kind::FixedTerm, decimal("0.1"));
        bill.add_free_minutes(42).unwrap();

        assert_eq!(bill.cost(), Money::zero(Currency::Cad));
    }

    #[test]
    fn negative_fixed_cost_is_credit() {
        let mut bill = Bill::new(Currency::Usd);
        bill.set_rate(contract::Kind::Prepaid, decimal("0.025"));
        bill.add_fixed_cost(decimal("-25"));
        bill.add_billed_minutes(40).unwrap();

        assert_eq!(bill.cost().amount, decimal("-24"));
    }

    #[test]
    fn rejects_minutes_beyond_counter() {
        let mut bill = Bill::new(Currency::Usd);
        bill.set_rate(contract::Kind::MonthToMonth, decimal("0.05"));
        bill.add_free_minutes(u64::MAX - 10).unwrap();
        bill.add_billed_minutes(10).unwrap();

        assert_eq!(
            bill.add_billed_minutes(1),
            Err(MinutesOverflow { minutes: 1 }),
        );
        assert_eq!(
            bill.add_free_minutes(u64::MAX),
            Err(MinutesOverflow { minutes: u64::MAX }),
        );
        assert_eq!(bill.billed_minutes(), 10);
        assert_eq!(bill.total_minutes(), u64::MAX);
    }
}

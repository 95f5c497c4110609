//! [`Tariffs`] of the rate plans.

use common::Currency;
use rust_decimal::Decimal;
use smart_default::SmartDefault;

#[cfg(doc)]
use crate::domain::{contract, Bill};

/// Pricing of every rate plan offered.
///
/// A [`contract::Contract`] captures its tariff when created, so changing
/// [`Tariffs`] never re-rates existing lines.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default)
)]
pub struct Tariffs {
    /// [`Currency`] every [`Bill`] is issued in.
    #[default(Currency::Usd)]
    pub currency: Currency,

    /// [`contract::MonthToMonth`] pricing.
    pub month_to_month: MonthToMonth,

    /// [`contract::FixedTerm`] pricing.
    pub fixed_term: FixedTerm,

    /// [`contract::Prepaid`] pricing.
    pub prepaid: Prepaid,
}

/// [`contract::MonthToMonth`] pricing.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default)
)]
pub struct MonthToMonth {
    /// Fixed fee charged every month.
    #[default(Decimal::new(50_00, 2))]
    pub monthly_fee: Decimal,

    /// Price of a single billed minute.
    #[default(Decimal::new(5, 2))]
    pub per_minute: Decimal,
}

/// [`contract::FixedTerm`] pricing.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default)
)]
pub struct FixedTerm {
    /// Fixed fee charged every month.
    #[default(Decimal::new(20_00, 2))]
    pub monthly_fee: Decimal,

    /// Deposit charged once, in the month the term starts.
    #[default(Decimal::new(300_00, 2))]
    pub deposit: Decimal,

    /// Price of a single billed minute, once free minutes are exhausted.
    #[default(Decimal::new(1, 1))]
    pub per_minute: Decimal,

    /// Minutes included every month. Unused ones don't roll over.
    #[default(100)]
    pub free_minutes: u32,
}

/// [`contract::Prepaid`] pricing.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default)
)]
pub struct Prepaid {
    /// Price of a single billed minute.
    #[default(Decimal::new(25, 3))]
    pub per_minute: Decimal,

    /// Amount of credit added by a single automatic top-up.
    #[default(Decimal::new(25_00, 2))]
    pub top_up: Decimal,

    /// Credit a line must carry into every new month.
    #[default(Decimal::new(10_00, 2))]
    pub min_credit: Decimal,
}

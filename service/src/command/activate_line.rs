//! [`Command`] for activating a new [`Line`].

use common::Period;
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{contract, line, Bill, Contract, Line, Tariffs},
    Service,
};

use super::Command;

/// [`Command`] for activating a new [`Line`].
///
/// If the [`Service`] is already in the billing month the [`Line`] starts in,
/// the [`Line`] joins it right away. A [`Line`] cannot start in a billing
/// month that is over already.
#[derive(Clone, Debug)]
pub struct ActivateLine {
    /// [`line::Number`] of a new [`Line`].
    pub number: line::Number,

    /// [`Plan`] to bill a new [`Line`] by.
    pub plan: Plan,

    /// [`contract::StartDate`] of a new [`Line`].
    pub start: contract::StartDate,
}

/// Rate plan to activate a [`Line`] with.
#[derive(Clone, Copy, Debug)]
pub enum Plan {
    /// [`contract::MonthToMonth`] plan.
    MonthToMonth,

    /// [`contract::FixedTerm`] plan.
    FixedTerm {
        /// [`contract::EndDate`] of the term.
        end: contract::EndDate,
    },

    /// [`contract::Prepaid`] plan.
    Prepaid {
        /// Credit purchased upon activation.
        initial_credit: Decimal,
    },
}

impl Command<ActivateLine> for Service {
    type Ok = Line;
    type Err = Traced<ExecutionError>;

    fn execute(&mut self, cmd: ActivateLine) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ActivateLine {
            number,
            plan,
            start,
        } = cmd;

        if self.lines.contains_key(&number) {
            return Err(tracerr::new!(E::LineAlreadyExists(number)));
        }
        if let Some(current) = self.period.filter(|p| start.period() < *p) {
            return Err(tracerr::new!(E::StartInPast { start, current }));
        }

        let Tariffs {
            currency,
            month_to_month,
            fixed_term,
            prepaid,
        } = self.config.tariffs;
        let mut contract = match plan {
            Plan::MonthToMonth => Contract::from(
                contract::MonthToMonth::new(start, month_to_month, currency),
            ),
            Plan::FixedTerm { end } => {
                contract::FixedTerm::new(start, end, fixed_term, currency)
                    .map(Contract::from)
                    .map_err(E::from)
                    .map_err(tracerr::wrap!())?
            }
            Plan::Prepaid { initial_credit } => {
                contract::Prepaid::new(start, initial_credit, prepaid, currency)
                    .map(Contract::from)
                    .map_err(E::from)
                    .map_err(tracerr::wrap!())?
            }
        };

        if let Some(period) = self.period.filter(|p| start.period() == *p) {
            _ = contract
                .advance_month(period, Bill::new(currency))
                .map_err(E::from)
                .map_err(tracerr::wrap!())?;
        }

        log::info!(
            "`Line({number})` activated on `{}` plan since `{start}`",
            contract.kind(),
        );

        let line = Line { number, contract };
        _ = self.lines.insert(line.number.clone(), line.clone());

        Ok(line)
    }
}

/// Error of [`ActivateLine`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Contract`] cannot be created or advanced.
    #[display("`Contract` failed: {_0}")]
    #[from]
    Contract(contract::Error),

    /// [`Line`] with the provided [`line::Number`] exists already.
    #[display("`Line({_0})` exists already")]
    LineAlreadyExists(#[error(not(source))] line::Number),

    /// [`Line`] starts in a billing month preceding the current one.
    #[display("`Line` cannot start on `{start}` in `{current}` period")]
    StartInPast {
        /// Requested [`contract::StartDate`].
        start: contract::StartDate,

        /// [`Period`] the [`Service`] is currently in.
        current: Period,
    },
}

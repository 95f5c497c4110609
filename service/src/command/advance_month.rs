//! [`Command`] for advancing all the [`Line`]s into a new billing month.

use std::collections::BTreeMap;

use common::Period;
use derive_more::{Display, Error};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{contract, line, Bill},
    Service,
};
#[cfg(doc)]
use crate::domain::Line;

use super::Command;

/// [`Command`] for advancing all the [`Line`]s into a new billing month.
///
/// Every active [`Line`] gets a fresh [`Bill`], while the closed ones are
/// handed back. [`Line`]s starting after the [`Period`] are left untouched.
#[derive(Clone, Copy, Debug)]
pub struct AdvanceMonth {
    /// [`Period`] of the new billing month.
    pub period: Period,
}

impl Command<AdvanceMonth> for Service {
    type Ok = BTreeMap<line::Number, Bill>;
    type Err = Traced<ExecutionError>;

    fn execute(&mut self, cmd: AdvanceMonth) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AdvanceMonth { period } = cmd;

        if let Some(current) = self.period.filter(|p| period <= *p) {
            return Err(tracerr::new!(E::PeriodNotAfter {
                current,
                requested: period,
            }));
        }

        let currency = self.config.tariffs.currency;
        let mut closed = BTreeMap::new();
        for (number, line) in &mut self.lines {
            if line.contract.start().is_none_or(|s| s.period() > period) {
                continue;
            }
            let previous = line
                .contract
                .advance_month(period, Bill::new(currency))
                .map_err(|source| E::Contract {
                    number: number.clone(),
                    source,
                })
                .map_err(tracerr::wrap!())?;
            if let Some(bill) = previous {
                log::debug!("`Line({number})` bill closed at {}", bill.cost());
                _ = closed.insert(number.clone(), bill);
            }
        }
        self.period = Some(period);

        log::info!(
            "advanced to `{period}` with {} closed bill(s)",
            closed.len(),
        );

        Ok(closed)
    }
}

/// Error of [`AdvanceMonth`] [`Command`] execution.
#[derive(Debug, Display, Error)]
pub enum ExecutionError {
    /// [`Period`] doesn't follow the current one.
    #[display("`{requested}` is not after the current `{current}` period")]
    PeriodNotAfter {
        /// [`Period`] the [`Service`] is currently in.
        current: Period,

        /// Requested [`Period`].
        requested: Period,
    },

    /// [`Line`]'s [`Contract`] cannot be advanced.
    ///
    /// [`Contract`]: contract::Contract
    #[display("`Line({number})` cannot be advanced: {source}")]
    Contract {
        /// [`line::Number`] of the failed [`Line`].
        #[error(not(source))]
        number: line::Number,

        /// Reason of the failure.
        source: contract::Error,
    },
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{AdvanceMonth, ExecutionError};
    use crate::{
        command::{activate_line::Plan, ActivateLine, Command as _},
        domain::line,
        Config, Service,
    };

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn advance(svc: &mut Service, period: &str) -> usize {
        svc.execute(AdvanceMonth {
            period: period.parse().unwrap(),
        })
        .unwrap()
        .len()
    }

    fn service() -> Service {
        let mut svc = Service::new(Config::default());
        for (number, plan, start) in [
            ("555-0001", Plan::MonthToMonth, "2025-01-02"),
            (
                "555-0002",
                Plan::FixedTerm {
                    end: "2025-06-30".parse().unwrap(),
                },
                "2025-01-15",
            ),
            ("555-0003", Plan::MonthToMonth, "2025-03-01"),
        ] {
            _ = svc
                .execute(ActivateLine {
                    number: number.parse().unwrap(),
                    plan,
                    start: start.parse().unwrap(),
                })
                .unwrap();
        }
        svc
    }

    #[test]
    fn binds_fresh_bills() {
        let mut svc = service();

        assert_eq!(advance(&mut svc, "2025-01"), 0);

        let m2m = svc.bill(&"555-0001".parse().unwrap()).unwrap();
        assert_eq!(m2m.cost().amount, decimal("50"));
        let fixed = svc.bill(&"555-0002".parse().unwrap()).unwrap();
        assert_eq!(fixed.cost().amount, decimal("320"));
        assert!(svc.bill(&"555-0003".parse().unwrap()).is_none());
    }

    #[test]
    fn hands_closed_bills_back() {
        let mut svc = service();
        _ = advance(&mut svc, "2025-01");

        let closed = svc
            .execute(AdvanceMonth {
                period: "2025-02".parse().unwrap(),
            })
            .unwrap();

        assert_eq!(closed.len(), 2);
        assert_eq!(
            closed[&"555-0002".parse::<line::Number>().unwrap()].cost().amount,
            decimal("320"),
        );
        assert_eq!(
            svc.bill(&"555-0002".parse().unwrap()).unwrap().cost().amount,
            decimal("20"),
        );
    }

    #[test]
    fn picks_up_lines_once_started() {
        let mut svc = service();
        _ = advance(&mut svc, "2025-01");
        _ = advance(&mut svc, "2025-02");

        assert_eq!(advance(&mut svc, "2025-03"), 2);
        assert!(svc.bill(&"555-0003".parse().unwrap()).is_some());
    }

    #[test]
    fn allows_skipping_months() {
        let mut svc = service();
        _ = advance(&mut svc, "2025-01");

        assert_eq!(advance(&mut svc, "2025-05"), 2);
        assert_eq!(svc.period(), Some("2025-05".parse().unwrap()));
    }

    #[test]
    fn rejects_past_period() {
        let mut svc = service();
        _ = advance(&mut svc, "2025-02");

        for period in ["2025-02", "2025-01"] {
            let err = svc
                .execute(AdvanceMonth {
                    period: period.parse().unwrap(),
                })
                .unwrap_err();

            assert!(matches!(
                err.as_ref(),
                ExecutionError::PeriodNotAfter { .. },
            ));
        }
        assert_eq!(svc.period(), Some("2025-02".parse().unwrap()));
    }
}

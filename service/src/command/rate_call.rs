//! [`Command`] for rating a [`Call`].

use common::Period;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{contract, line, Call},
    Service,
};
#[cfg(doc)]
use crate::domain::{Bill, Line};

use super::Command;

/// [`Command`] for rating a [`Call`] onto the current [`Bill`] of its source
/// [`Line`].
#[derive(Clone, Debug)]
pub struct RateCall {
    /// [`Call`] to rate.
    pub call: Call,
}

impl Command<RateCall> for Service {
    type Ok = ();
    type Err = Traced<ExecutionError>;

    fn execute(&mut self, cmd: RateCall) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RateCall { call } = cmd;

        let line = self
            .lines
            .get_mut(&call.source)
            .ok_or_else(|| E::LineNotExists(call.source.clone()))
            .map_err(tracerr::wrap!())?;

        let placed = call.date.period();
        if let Some(bound) = line.contract.period() {
            if bound != placed {
                return Err(tracerr::new!(E::CallOutsidePeriod {
                    bound,
                    placed,
                }));
            }
        }

        line.contract
            .rate_call(&call)
            .map_err(E::from)
            .map_err(tracerr::wrap!())?;

        log::debug!(
            "`Call` from `{}` to `{}` on `{}` rated for {} minute(s)",
            call.source,
            call.destination,
            call.date,
            call.minutes(),
        );

        Ok(())
    }
}

/// Error of [`RateCall`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Call`] was placed outside the billing month of its [`Line`].
    #[display("`Call` placed in `{placed}` cannot go onto `{bound}` bill")]
    CallOutsidePeriod {
        /// [`Period`] the [`Line`] is billed in.
        bound: Period,

        /// [`Period`] the [`Call`] was placed in.
        placed: Period,
    },

    /// [`Contract`] rejected the [`Call`].
    ///
    /// [`Contract`]: contract::Contract
    #[display("`Contract` failed: {_0}")]
    #[from]
    Contract(contract::Error),

    /// [`Line`] with the provided [`line::Number`] does not exist.
    #[display("`Line({_0})` does not exist")]
    LineNotExists(#[error(not(source))] line::Number),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use rust_decimal::Decimal;

    use super::{ExecutionError, RateCall};
    use crate::{
        command::{activate_line::Plan, ActivateLine, AdvanceMonth, Command as _},
        domain::{contract, Call},
        Config, Service,
    };

    fn call(from: &str, date: &str, secs: u64) -> RateCall {
        RateCall {
            call: Call {
                source: from.parse().unwrap(),
                destination: "555-9999".parse().unwrap(),
                date: date.parse().unwrap(),
                duration: Duration::from_secs(secs),
                source_location: Default::default(),
                destination_location: Default::default(),
            },
        }
    }

    fn service(plan: Plan) -> Service {
        let mut svc = Service::new(Config::default());
        _ = svc
            .execute(ActivateLine {
                number: "555-0001".parse().unwrap(),
                plan,
                start: "2025-01-02".parse().unwrap(),
            })
            .unwrap();
        svc
    }

    #[test]
    fn rates_onto_current_bill() {
        let mut svc = service(Plan::MonthToMonth);
        _ = svc
            .execute(AdvanceMonth {
                period: "2025-01".parse().unwrap(),
            })
            .unwrap();

        svc.execute(call("555-0001", "2025-01-20", 61)).unwrap();
        svc.execute(call("555-0001", "2025-01-21", 600)).unwrap();

        let bill = svc.bill(&"555-0001".parse().unwrap()).unwrap();
        assert_eq!(bill.billed_minutes(), 12);
        assert_eq!(bill.cost().amount, "50.60".parse::<Decimal>().unwrap());
    }

    #[test]
    fn rejects_unknown_line() {
        let mut svc = service(Plan::MonthToMonth);

        let err = svc.execute(call("555-0404", "2025-01-20", 60)).unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::LineNotExists(_)));
    }

    #[test]
    fn rejects_call_before_first_month() {
        let mut svc = service(Plan::MonthToMonth);

        let err = svc.execute(call("555-0001", "2025-01-20", 60)).unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Contract(contract::Error::NoCurrentBill),
        ));
    }

    #[test]
    fn rejects_call_of_other_month() {
        let mut svc = service(Plan::MonthToMonth);
        _ = svc
            .execute(AdvanceMonth {
                period: "2025-02".parse().unwrap(),
            })
            .unwrap();

        let err = svc.execute(call("555-0001", "2025-01-31", 60)).unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::CallOutsidePeriod { .. },
        ));
        let bill = svc.bill(&"555-0001".parse().unwrap()).unwrap();
        assert_eq!(bill.billed_minutes(), 0);
    }
}

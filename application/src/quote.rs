//! Simulation of a single line billed over consecutive months.

use std::time::Duration;

use common::{datetime::ParseError, Period};
use derive_more::{Display, Error as StdError, From};
use rust_decimal::Decimal;
use service::{
    command::{
        activate_line::{self, Plan},
        advance_month, cancel_line, rate_call, ActivateLine, AdvanceMonth,
        CancelLine, RateCall,
    },
    domain::{call, contract::Settlement, line, Bill, Call},
    Command as _, Service,
};
use tracerr::Traced;
use tracing as log;

use crate::args;

/// Synthetic usage of a line to quote.
#[derive(Clone, Debug)]
pub struct Quote {
    /// [`line::Number`] of the quoted line.
    pub number: line::Number,

    /// Rate plan to activate the line with.
    pub plan: Plan,

    /// Date the line is activated on.
    pub start: service::domain::contract::StartDate,

    /// Number of billing months to simulate.
    pub months: u8,

    /// Number of calls placed every month.
    pub calls: u32,

    /// Duration of every call.
    pub duration: Duration,
}

impl Quote {
    /// Creates a new [`Quote`] out of the command line [`args::Args`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEnd`] if a fixed-term plan has no end date.
    pub fn from_args(args: &args::Args) -> Result<Self, Error> {
        let plan = match args.plan {
            args::Plan::MonthToMonth => Plan::MonthToMonth,
            args::Plan::FixedTerm => Plan::FixedTerm {
                end: args.end.ok_or(Error::MissingEnd)?,
            },
            args::Plan::Prepaid => Plan::Prepaid {
                initial_credit: args.credit,
            },
        };
        Ok(Self {
            number: args.number.clone(),
            plan,
            start: args.start,
            months: args.months,
            calls: args.calls,
            duration: Duration::from_secs(args.seconds),
        })
    }

    /// Runs this [`Quote`] on the provided [`Service`], cancelling the line
    /// after the last month.
    ///
    /// # Errors
    ///
    /// Errors if any of the [`Service`] commands fails.
    pub fn run(self, service: &mut Service) -> Result<Report, Error> {
        let Self {
            number,
            plan,
            start,
            months,
            calls,
            duration,
        } = self;

        _ = service.execute(ActivateLine {
            number: number.clone(),
            plan,
            start,
        })?;

        let mut bills = Vec::with_capacity(usize::from(months));
        let mut period = start.period();
        for month in 0..months {
            if month > 0 {
                period = period.next().ok_or(Error::OutOfCalendar)?;
            }

            let mut closed = service.execute(AdvanceMonth { period })?;
            if let Some(bill) = closed.remove(&number).filter(|_| month > 0) {
                bills.push(bill);
            }

            let day = if period == start.period() { start.day() } else { 1 };
            let date = call::Date::from_calendar_date(
                period.year(),
                period.month(),
                day,
            )?;
            for _ in 0..calls {
                service.execute(RateCall {
                    call: Call {
                        source: number.clone(),
                        destination: number.clone(),
                        date,
                        duration,
                        source_location: call::Location::default(),
                        destination_location: call::Location::default(),
                    },
                })?;
            }
        }

        if let Some(bill) = service.bill(&number) {
            bills.push(bill.clone());
        }
        let settlement = service.execute(CancelLine { number })?;

        Ok(Report {
            start: start.period(),
            bills,
            settlement,
        })
    }
}

/// Outcome of a [`Quote`].
#[derive(Clone, Debug)]
pub struct Report {
    /// [`Period`] of the first [`Bill`].
    pub start: Period,

    /// [`Bill`]s of every simulated month, in order.
    pub bills: Vec<Bill>,

    /// [`Settlement`] the line was cancelled with.
    pub settlement: Settlement,
}

impl Report {
    /// Returns the total cost of all the [`Bill`]s.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.bills.iter().map(|b| b.cost().amount).sum()
    }

    /// Logs every [`Bill`] and the [`Settlement`] of this [`Report`].
    pub fn log(&self) {
        let periods = std::iter::successors(Some(self.start), |p| p.next());
        for (period, bill) in periods.zip(&self.bills) {
            log::info!(
                "`{period}`: {} fixed, {} billed and {} free minute(s) \
                 at {} = {}",
                bill.fixed_cost(),
                bill.billed_minutes(),
                bill.free_minutes(),
                bill.per_minute(),
                bill.cost(),
            );
        }
        log::info!("line cancelled with a {}", self.settlement);
    }
}

/// Error of running a [`Quote`].
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Fixed-term plan is quoted without an end date.
    #[display("fixed-term plan requires an end date")]
    MissingEnd,

    /// Simulated months run past the supported calendar.
    #[display("simulated months run past the supported calendar")]
    OutOfCalendar,

    /// Call date cannot be constructed.
    #[display("invalid call date: {_0}")]
    #[from]
    Date(ParseError),

    /// Line cannot be activated.
    #[display("failed to activate line: {_0}")]
    #[from]
    Activate(Traced<activate_line::ExecutionError>),

    /// Billing month cannot be advanced.
    #[display("failed to advance month: {_0}")]
    #[from]
    Advance(Traced<advance_month::ExecutionError>),

    /// Call cannot be rated.
    #[display("failed to rate call: {_0}")]
    #[from]
    Rate(Traced<rate_call::ExecutionError>),

    /// Line cannot be cancelled.
    #[display("failed to cancel line: {_0}")]
    #[from]
    Cancel(Traced<cancel_line::ExecutionError>),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use rust_decimal::Decimal;
    use service::{command::activate_line::Plan, Config, Service};

    use super::{Error, Quote};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn quote(plan: Plan, months: u8, calls: u32, secs: u64) -> Quote {
        Quote {
            number: "555-0100".parse().unwrap(),
            plan,
            start: "2025-01-10".parse().unwrap(),
            months,
            calls,
            duration: Duration::from_secs(secs),
        }
    }

    #[test]
    fn quotes_month_to_month() {
        let mut svc = Service::new(Config::default());

        let report = quote(Plan::MonthToMonth, 2, 10, 90)
            .run(&mut svc)
            .unwrap();

        assert_eq!(report.bills.len(), 2);
        assert_eq!(report.bills[0].cost().amount, decimal("51"));
        assert_eq!(report.total(), decimal("102"));
        assert_eq!(report.settlement.amount(), decimal("51"));
        assert_eq!(svc.lines().count(), 0);
    }

    #[test]
    fn quotes_fixed_term() {
        let mut svc = Service::new(Config::default());

        let report = quote(
            Plan::FixedTerm {
                end: "2025-02-28".parse().unwrap(),
            },
            3,
            12,
            600,
        )
        .run(&mut svc)
        .unwrap();

        assert_eq!(report.bills.len(), 3);
        assert_eq!(report.bills[0].cost().amount, decimal("322"));
        assert_eq!(report.bills[1].cost().amount, decimal("22"));
        assert_eq!(report.settlement.amount(), decimal("278"));
    }

    #[test]
    fn quotes_prepaid() {
        let mut svc = Service::new(Config::default());

        let report = quote(
            Plan::Prepaid {
                initial_credit: decimal("40"),
            },
            1,
            0,
            0,
        )
        .run(&mut svc)
        .unwrap();

        assert_eq!(report.bills.len(), 1);
        assert_eq!(report.bills[0].cost().amount, decimal("-40"));
        assert_eq!(report.settlement.amount(), decimal("0"));
    }

    #[test]
    fn stops_at_calendar_end() {
        let mut svc = Service::new(Config::default());
        let mut q = quote(Plan::MonthToMonth, 2, 1, 60);
        q.start = "9999-12-01".parse().unwrap();

        assert!(matches!(q.run(&mut svc), Err(Error::OutOfCalendar)));
    }
}

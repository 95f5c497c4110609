//! [`Args`] definitions.

use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use service::domain::{contract, line};

/// Quotes a phone line rate plan over a number of billing months.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Rate plan to quote.
    #[arg(short, long, value_enum, default_value_t = Plan::MonthToMonth)]
    pub plan: Plan,

    /// Number of the quoted line.
    #[arg(short, long, default_value = "555-0100")]
    pub number: line::Number,

    /// Date the line is activated on, in `YYYY-MM-DD` format.
    #[arg(short, long)]
    pub start: contract::StartDate,

    /// Date the term ends on, in `YYYY-MM-DD` format.
    #[arg(short, long, required_if_eq("plan", "fixed-term"))]
    pub end: Option<contract::EndDate>,

    /// Credit purchased upon activation of a prepaid line.
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub credit: Decimal,

    /// Number of billing months to simulate.
    #[arg(
        short,
        long,
        default_value_t = 3,
        value_parser = clap::value_parser!(u8).range(1..),
    )]
    pub months: u8,

    /// Number of calls placed every month.
    #[arg(long, default_value_t = 30)]
    pub calls: u32,

    /// Duration of every call in seconds.
    #[arg(long, default_value_t = 120)]
    pub seconds: u64,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Rate plan to quote.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Plan {
    /// [`contract::MonthToMonth`] plan.
    MonthToMonth,

    /// [`contract::FixedTerm`] plan.
    FixedTerm,

    /// [`contract::Prepaid`] plan.
    Prepaid,
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use super::{Args, Plan};

    #[test]
    fn parses_defaults() {
        let args = Args::try_parse_from(["billing-quote", "-s", "2025-01-10"])
            .unwrap();

        assert_eq!(args.config, "config.toml");
        assert_eq!(args.plan, Plan::MonthToMonth);
        assert_eq!(args.number.to_string(), "555-0100");
        assert_eq!(args.start.to_string(), "2025-01-10");
        assert_eq!(args.months, 3);
    }

    #[test]
    fn requires_end_for_fixed_term() {
        assert!(Args::try_parse_from([
            "billing-quote",
            "--plan",
            "fixed-term",
            "--start",
            "2025-01-10",
        ])
        .is_err());

        let args = Args::try_parse_from([
            "billing-quote",
            "--plan",
            "fixed-term",
            "--start",
            "2025-01-10",
            "--end",
            "2025-12-31",
        ])
        .unwrap();
        assert_eq!(args.end.unwrap().to_string(), "2025-12-31");
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(Args::try_parse_from([
            "billing-quote",
            "--start",
            "2025-01-10",
            "--months",
            "0",
        ])
        .is_err());
        assert!(Args::try_parse_from([
            "billing-quote",
            "--start",
            "2025-01-10",
            "--number",
            "not a number",
        ])
        .is_err());
        assert!(
            Args::try_parse_from(["billing-quote", "--start", "2025-02-30"])
                .is_err(),
        );
    }
}

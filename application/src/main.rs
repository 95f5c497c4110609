use std::{io, sync::OnceLock};

use application::{Args, Config, Quote};
use service::Service;
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    if start().is_err() {
        std::process::exit(1);
    }
}

fn start() -> Result<(), ()> {
    let args = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let config = Config::new(&args.config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(config.log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let quote = Quote::from_args(&args).map_err(|e| {
        log::error!("invalid quote: {e}");
    })?;
    log::info!(
        "quoting `{:?}` plan of `{}` since `{}` for {} month(s)",
        args.plan,
        quote.number,
        quote.start,
        quote.months,
    );

    let mut service = Service::new(config.into());
    let report = quote.run(&mut service).map_err(|e| {
        log::error!("quote failed: {e}");
    })?;

    report.log();
    log::info!(
        "total of {} bill(s) is {}{}",
        report.bills.len(),
        report.total().normalize(),
        service.config().tariffs.currency,
    );

    Ok(())
}

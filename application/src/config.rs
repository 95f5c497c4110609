//! [`Config`]-related definitions.

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::domain::Tariffs;

/// Application configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// [`Tariffs`] lines are billed with.
    pub tariffs: Tariffs,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

impl From<Config> for service::Config {
    fn from(value: Config) -> Self {
        let Config { tariffs, log: _ } = value;
        Self { tariffs }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Currency;
    use config::{builder::DefaultState, ConfigBuilder, FileFormat};
    use rust_decimal::Decimal;

    use super::Config;

    fn load(toml: &str) -> Config {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn falls_back_to_defaults() {
        let conf = load("");

        assert_eq!(conf.tariffs.currency, Currency::Usd);
        assert_eq!(
            conf.tariffs.month_to_month.monthly_fee,
            "50".parse::<Decimal>().unwrap(),
        );
        assert_eq!(conf.tariffs.fixed_term.free_minutes, 100);
    }

    #[test]
    fn overrides_tariffs_partially() {
        let conf = load(
            r#"
            [log]
            level = "DEBUG"

            [tariffs]
            currency = "CAD"

            [tariffs.prepaid]
            top_up = "40"
            "#,
        );

        assert_eq!(conf.tariffs.currency, Currency::Cad);
        assert_eq!(conf.tariffs.prepaid.top_up, "40".parse::<Decimal>().unwrap());
        assert_eq!(
            conf.tariffs.prepaid.min_credit,
            "10".parse::<Decimal>().unwrap(),
        );
        assert_eq!(
            tracing::Level::from(conf.log.level),
            tracing::Level::DEBUG,
        );
    }
}

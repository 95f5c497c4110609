//! Service contains the billing logic of phone lines.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;

use std::collections::BTreeMap;

use common::Period;

use self::domain::{line, Bill, Line, Tariffs};

pub use self::command::Command;

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    /// [`Tariffs`] new lines are activated with.
    pub tariffs: Tariffs,
}

/// Billing service driving the phone [`Line`]s through billing months.
#[derive(Clone, Debug)]
pub struct Service {
    /// Configuration of this [`Service`].
    config: Config,

    /// Registered [`Line`]s by their [`line::Number`]s.
    lines: BTreeMap<line::Number, Line>,

    /// Billing [`Period`] the [`Line`]s were last advanced to.
    period: Option<Period>,
}

impl Service {
    /// Creates a new [`Service`] with the provided [`Config`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            lines: BTreeMap::new(),
            period: None,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the billing [`Period`] the [`Line`]s were last advanced to.
    #[must_use]
    pub fn period(&self) -> Option<Period> {
        self.period
    }

    /// Returns the [`Line`] with the provided [`line::Number`], if any.
    #[must_use]
    pub fn line(&self, number: &line::Number) -> Option<&Line> {
        self.lines.get(number)
    }

    /// Iterates over all the registered [`Line`]s.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    /// Returns the current [`Bill`] of the [`Line`] with the provided
    /// [`line::Number`], if any.
    #[must_use]
    pub fn bill(&self, number: &line::Number) -> Option<&Bill> {
        self.line(number).and_then(|l| l.contract.bill())
    }
}

//! Phone [`Line`] definitions.

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display};
use regex::Regex;

use crate::domain::Contract;

/// Phone line bound to exactly one [`Contract`].
#[derive(Clone, Debug)]
pub struct Line {
    /// [`Number`] of this [`Line`].
    pub number: Number,

    /// [`Contract`] this [`Line`] is billed by.
    pub contract: Contract,
}

/// Phone number of a [`Line`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(str, String)]
pub struct Number(String);

impl Number {
    /// Creates a new [`Number`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Number`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Number`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^([+]?\d{1,2}[-\s]?)?(\d{3}[-\s]?)?\d{3}-?\d{4}$")
                .expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Number {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Number`")
    }
}

#[cfg(test)]
mod spec {
    use super::Number;

    #[test]
    fn accepts_phone_numbers() {
        for n in ["867-5309", "8675309", "416-555-0199", "+1 416-555-0199"] {
            assert!(Number::new(n).is_some(), "{n}");
        }
    }

    #[test]
    fn rejects_garbage() {
        for n in ["", "867-530", "call me", " 867-5309", "867-5309x"] {
            assert!(Number::new(n).is_none(), "{n}");
        }
    }
}

//! [`Call`] definitions.

use std::time::Duration;

use common::{unit, DateOf};

use crate::domain::line;
#[cfg(doc)]
use crate::domain::{Bill, Contract};

/// Phone call placed from one line to another.
///
/// [`Call`]s are rated by a [`Contract`], but never owned by it.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    /// [`line::Number`] the [`Call`] was placed from.
    pub source: line::Number,

    /// [`line::Number`] the [`Call`] was placed to.
    pub destination: line::Number,

    /// [`Date`] when the [`Call`] was placed.
    pub date: Date,

    /// Duration of the [`Call`].
    pub duration: Duration,

    /// [`Location`] of the caller.
    pub source_location: Location,

    /// [`Location`] of the callee.
    pub destination_location: Location,
}

impl Call {
    /// Returns the number of minutes to put on a [`Bill`] for this [`Call`].
    ///
    /// Any started minute counts as a whole one.
    #[must_use]
    pub fn minutes(&self) -> u64 {
        minutes(self.duration)
    }
}

/// Converts the provided `duration` into whole minutes, rounding up.
///
/// Any [`Duration`] fits, as a minute is longer than a second.
#[must_use]
pub fn minutes(duration: Duration) -> u64 {
    let seconds = duration.as_secs();
    let started = seconds % 60 > 0 || duration.subsec_nanos() > 0;
    seconds / 60 + u64::from(started)
}

/// Geographic location of a [`Call`] endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Location {
    /// Longitude in degrees.
    pub longitude: f64,

    /// Latitude in degrees.
    pub latitude: f64,
}

/// [`DateOf`] when a [`Call`] was placed.
pub type Date = DateOf<(Call, unit::Placement)>;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::minutes;

    #[test]
    fn rounds_up_to_whole_minutes() {
        assert_eq!(minutes(Duration::from_secs(0)), 0);
        assert_eq!(minutes(Duration::from_secs(1)), 1);
        assert_eq!(minutes(Duration::from_secs(59)), 1);
        assert_eq!(minutes(Duration::from_secs(60)), 1);
        assert_eq!(minutes(Duration::from_secs(61)), 2);
        assert_eq!(minutes(Duration::from_secs(120)), 2);
        assert_eq!(minutes(Duration::from_secs(3601)), 61);
    }

    #[test]
    fn sub_second_fraction_counts() {
        assert_eq!(minutes(Duration::from_millis(1)), 1);
        assert_eq!(minutes(Duration::from_millis(60_001)), 2);
        assert_eq!(minutes(Duration::from_millis(59_999)), 1);
    }

    #[test]
    fn longest_duration_is_not_clamped() {
        assert_eq!(minutes(Duration::MAX), u64::MAX / 60 + 1);
        assert_eq!(
            minutes(Duration::from_secs(u64::MAX - u64::MAX % 60)),
            u64::MAX / 60,
        );
    }
}

//! Calendar date utilities.
//!
//! Billing works with whole calendar days and months only: there is no time
//! of day and no timezone involved.

use std::{
    cmp::Ordering, fmt, marker::PhantomData, ops::RangeInclusive,
    str::FromStr,
};

use derive_more::{Debug, Display, Error};
use time::{
    format_description::BorrowedFormatItem, macros::format_description,
    parsing::Parsed, Month,
};

/// Format of a [`Date`].
const DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// Format of a [`Period`].
const PERIOD_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]");

/// Years a [`Date`] or a [`Period`] may fall into.
const YEARS: RangeInclusive<i32> =
    time::Date::MIN.year()..=time::Date::MAX.year();

/// Untyped calendar date.
pub type Date = DateOf;

/// Calendar date.
#[derive(Debug)]
pub struct DateOf<Of: ?Sized = ()> {
    /// Inner representation of the date.
    inner: time::Date,

    /// Type parameter describing the kind of date.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateOf<Of> {
    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the components is out of range.
    pub fn from_calendar_date(
        year: i32,
        month: u8,
        day: u8,
    ) -> Result<Self, ParseError> {
        let month = Month::try_from(month).map_err(ParseError::ComponentRange)?;
        time::Date::from_calendar_date(year, month, day)
            .map(Self::from)
            .map_err(ParseError::ComponentRange)
    }

    /// Returns the year of this [`Date`].
    #[must_use]
    pub fn year(&self) -> i32 {
        self.inner.year()
    }

    /// Returns the month of this [`Date`] in `1..=12` range.
    #[must_use]
    pub fn month(&self) -> u8 {
        self.inner.month().into()
    }

    /// Returns the day of month of this [`Date`].
    #[must_use]
    pub fn day(&self) -> u8 {
        self.inner.day()
    }

    /// Returns the billing [`Period`] this [`Date`] falls into.
    #[must_use]
    pub fn period(&self) -> Period {
        Period {
            year: self.year(),
            month: self.month(),
        }
    }

    /// Coerces one kind of [`Date`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateOf<NewOf> {
        DateOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> Copy for DateOf<Of> {}
impl<Of: ?Sized> Clone for DateOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateOf<Of> {}
impl<Of: ?Sized> PartialEq for DateOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> From<time::Date> for DateOf<Of> {
    fn from(inner: time::Date) -> Self {
        Self {
            inner,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> From<DateOf<Of>> for time::Date {
    fn from(date: DateOf<Of>) -> Self {
        date.inner
    }
}

impl<Of: ?Sized> fmt::Display for DateOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.inner.format(DATE_FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&date)
    }
}

impl<Of: ?Sized> FromStr for DateOf<Of> {
    type Err = ParseError;

    /// Parses a [`Date`] in `YYYY-MM-DD` format.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_unsigned(s)?;
        time::Date::parse(s, DATE_FORMAT)
            .map(Self::from)
            .map_err(ParseError::Parse)
    }
}

/// Rejects explicitly signed years, which are not canonical.
fn check_unsigned(s: &str) -> Result<(), ParseError> {
    if s.starts_with(['+', '-']) {
        Err(ParseError::Format)
    } else {
        Ok(())
    }
}

/// Billing month of a specific year.
///
/// [`Period`]s are ordered chronologically.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Period {
    /// Year of this [`Period`].
    ///
    /// Goes first, so the derived ordering is chronological.
    year: i32,

    /// Month of this [`Period`] in `1..=12` range.
    month: u8,
}

impl Period {
    /// Creates a new [`Period`] out of the provided `month` and `year`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPeriod`] if the `month` is not in `1..=12` range, or
    /// the `year` is out of the range a [`Date`] supports.
    pub fn new(month: u8, year: i32) -> Result<Self, InvalidPeriod> {
        if (1..=12).contains(&month) && YEARS.contains(&year) {
            Ok(Self { year, month })
        } else {
            Err(InvalidPeriod { month, year })
        }
    }

    /// Returns the [`Period`] the provided [`Date`] falls into.
    #[must_use]
    pub fn of<Of: ?Sized>(date: DateOf<Of>) -> Self {
        date.period()
    }

    /// Returns the year of this [`Period`].
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month of this [`Period`] in `1..=12` range.
    #[must_use]
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns the [`Period`] following this one.
    ///
    /// [`None`] is returned for the last supported [`Period`].
    #[must_use]
    pub fn next(self) -> Option<Self> {
        if self.month == 12 {
            Self::new(1, self.year.checked_add(1)?).ok()
        } else {
            Self::new(self.month + 1, self.year).ok()
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = ParseError;

    /// Parses a [`Period`] in `YYYY-MM` format.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_unsigned(s)?;

        let mut parsed = Parsed::new();
        let rest = parsed
            .parse_items(s.as_bytes(), PERIOD_FORMAT)
            .map_err(|e| ParseError::Parse(e.into()))?;
        if !rest.is_empty() {
            return Err(ParseError::Format);
        }

        let (Some(year), Some(month)) = (parsed.year(), parsed.month()) else {
            return Err(ParseError::Format);
        };
        Self::new(month.into(), year).map_err(ParseError::Period)
    }
}

/// Error of constructing a [`Period`] with an out of range month or year.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[display("`{year}-{month:02}` is not a valid period")]
pub struct InvalidPeriod {
    /// Month that was rejected.
    month: u8,

    /// Year that was rejected.
    year: i32,
}

/// Error of parsing a [`Date`] or a [`Period`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Input doesn't match the expected format.
    #[display("unexpected format")]
    Format,

    /// Input cannot be parsed.
    #[display("cannot parse: {_0}")]
    Parse(time::error::Parse),

    /// Parsed [`Date`] has an out of range component.
    #[display("component out of range: {_0}")]
    ComponentRange(time::error::ComponentRange),

    /// Parsed [`Period`] is invalid.
    #[display("{_0}")]
    Period(InvalidPeriod),
}

#[cfg(test)]
mod spec {
    use super::{Date, InvalidPeriod, ParseError, Period};

    #[test]
    fn period_validates_month() {
        assert!(Period::new(1, 2025).is_ok());
        assert!(Period::new(12, 2025).is_ok());
        assert_eq!(
            Period::new(0, 2025),
            Err(InvalidPeriod {
                month: 0,
                year: 2025,
            }),
        );
        assert_eq!(
            Period::new(13, 2025),
            Err(InvalidPeriod {
                month: 13,
                year: 2025,
            }),
        );
    }

    #[test]
    fn period_validates_year() {
        assert!(Period::new(1, time::Date::MAX.year()).is_ok());
        assert!(Period::new(1, i32::MAX).is_err());
        assert!(Period::new(1, i32::MIN).is_err());
    }

    #[test]
    fn period_is_chronological() {
        let dec = Period::new(12, 2024).unwrap();
        let jan = Period::new(1, 2025).unwrap();
        let feb = Period::new(2, 2025).unwrap();

        assert!(dec < jan);
        assert!(jan < feb);
        assert_eq!(dec.next(), Some(jan));
        assert_eq!(jan.next(), Some(feb));
    }

    #[test]
    fn last_period_has_no_next() {
        let year = time::Date::MAX.year();
        let last = Period::new(12, year).unwrap();

        assert_eq!(last.next(), None);
        assert_eq!(Period::new(11, year).unwrap().next(), Some(last));
    }

    #[test]
    fn period_of_date() {
        let date: Date = "2025-03-17".parse().unwrap();

        assert_eq!(Period::of(date), Period::new(3, 2025).unwrap());
        assert_eq!(date.to_string(), "2025-03-17");
    }

    #[test]
    fn parses_period() {
        assert_eq!(
            "2025-07".parse::<Period>().unwrap(),
            Period::new(7, 2025).unwrap(),
        );
        assert_eq!(Period::new(7, 2025).unwrap().to_string(), "2025-07");
        assert!(matches!(
            "2025-13".parse::<Period>(),
            Err(ParseError::Parse(_)),
        ));
        assert!("2025".parse::<Period>().is_err());
        assert!("2025-7".parse::<Period>().is_err());
        assert!(matches!(
            "2025-07-01".parse::<Period>(),
            Err(ParseError::Format),
        ));
        assert!(matches!(
            "+2025-07".parse::<Period>(),
            Err(ParseError::Format),
        ));
    }

    #[test]
    fn parses_date() {
        assert!("2025-02-29".parse::<Date>().is_err());
        assert!("2024-02-29".parse::<Date>().is_ok());
        assert!("2024/02/29".parse::<Date>().is_err());
        assert!("2024-02".parse::<Date>().is_err());
    }

    #[test]
    fn date_is_canonical() {
        for s in ["2025-1-5", "+2025-01-05", "-2025-01-05", "2025-01-05 "] {
            assert!(s.parse::<Date>().is_err(), "`{s}` is accepted");
        }
        for s in ["2025-01-05", "0999-12-31"] {
            assert_eq!(s.parse::<Date>().unwrap().to_string(), s);
        }
    }
}

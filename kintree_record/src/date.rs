// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar dates for birthdays and whole-year age computation.

use core::fmt;
use core::str::FromStr;

/// A proleptic Gregorian calendar date.
///
/// Only the fields needed for birthdays and age computation are modeled; there
/// is no time of day and no time zone. Ordering is chronological.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BirthDate {
    year: i32,
    month: u8,
    day: u8,
}

impl BirthDate {
    /// Creates a date, returning `None` when `month`/`day` do not name a real day.
    #[must_use]
    pub fn new(year: i32, month: u8, day: u8) -> Option<Self> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month of the year, `1..=12`.
    #[must_use]
    pub const fn month(self) -> u8 {
        self.month
    }

    /// Day of the month, `1..=31`.
    #[must_use]
    pub const fn day(self) -> u8 {
        self.day
    }

    /// Date `days` days after 1970-01-01 (negative days count backwards).
    ///
    /// Hosts use this to turn a clock reading into "today". Returns `None`
    /// when the year does not fit in an `i32`.
    #[must_use]
    pub fn from_days_since_epoch(days: i64) -> Option<Self> {
        // Shift to an epoch of 0000-03-01 so leap days fall at the end of a
        // 400-year era's year.
        let z = days.checked_add(719_468)?;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + i64::from(month <= 2);
        Self::new(
            i32::try_from(year).ok()?,
            u8::try_from(month).ok()?,
            u8::try_from(day).ok()?,
        )
    }

    /// Age in whole years on `today`.
    ///
    /// The difference in years is decremented by one when `today`'s
    /// month/day precedes this date's month/day. There is no rounding. A
    /// `today` before the birth date yields a negative age.
    #[must_use]
    pub fn age_on(self, today: Self) -> i32 {
        let mut age = today.year - self.year;
        if (today.month, today.day) < (self.month, self.day) {
            age -= 1;
        }
        age
    }
}

impl fmt::Display for BirthDate {
    /// Formats as `M/D/YYYY`, the format used by hand-authored records.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.month, self.day, self.year)
    }
}

/// Error returned when a birthday string cannot be parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseDateError {
    kind: ParseDateErrorKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParseDateErrorKind {
    Format,
    OutOfRange,
}

impl fmt::Display for ParseDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseDateErrorKind::Format => {
                f.write_str("expected a date formatted as M/D/YYYY or YYYY-MM-DD")
            }
            ParseDateErrorKind::OutOfRange => f.write_str("month or day out of range"),
        }
    }
}

impl core::error::Error for ParseDateError {}

impl FromStr for BirthDate {
    type Err = ParseDateError;

    /// Parses `M/D/YYYY` (leading zeros optional) or ISO `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let malformed = ParseDateError {
            kind: ParseDateErrorKind::Format,
        };
        let (year, month, day) = if s.contains('/') {
            let mut parts = s.split('/');
            let month = parts.next().ok_or(malformed)?;
            let day = parts.next().ok_or(malformed)?;
            let year = parts.next().ok_or(malformed)?;
            if parts.next().is_some() {
                return Err(malformed);
            }
            (year, month, day)
        } else {
            let mut parts = s.split('-');
            let year = parts.next().ok_or(malformed)?;
            let month = parts.next().ok_or(malformed)?;
            let day = parts.next().ok_or(malformed)?;
            if parts.next().is_some() || year.len() != 4 {
                return Err(malformed);
            }
            (year, month, day)
        };

        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(year) || !digits(month) || !digits(day) {
            return Err(malformed);
        }
        let year: i32 = year.parse().map_err(|_| malformed)?;
        let month: u8 = month.parse().map_err(|_| malformed)?;
        let day: u8 = day.parse().map_err(|_| malformed)?;

        Self::new(year, month, day).ok_or(ParseDateError {
            kind: ParseDateErrorKind::OutOfRange,
        })
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BirthDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = alloc::string::String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BirthDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

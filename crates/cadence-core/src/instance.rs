//! The recurrence instance value.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{CoreError, CoreResult};
use crate::types::Weekday;

/// ## Summary
/// An immutable point in floating calendar time.
///
/// Fields are compared in declaration order, so the derived ordering is
/// chronological. The day field may name a date that does not exist in its
/// month (e.g. February 31st); expansions produce such candidates when they
/// address "day N of this month" and a later limit step drops them. Such an
/// instance still sorts between its real neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instance {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl Instance {
    /// ## Summary
    /// Creates an instance from its fields.
    ///
    /// Ranges are checked per field; whether the day exists in the given month
    /// is not (see [`Instance::is_valid`]).
    ///
    /// ## Errors
    /// Returns `InvalidInput` if month is outside `1..=12`, day outside
    /// `1..=31`, hour above 23, minute above 59 or second above 60.
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> CoreResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::InvalidInput(format!("month {month} out of range")));
        }
        if !(1..=31).contains(&day) {
            return Err(CoreError::InvalidInput(format!("day {day} out of range")));
        }
        if hour > 23 || minute > 59 || second > 60 {
            return Err(CoreError::InvalidInput(format!(
                "time {hour:02}:{minute:02}:{second:02} out of range"
            )));
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Creates an instance at midnight of the given date.
    ///
    /// ## Errors
    /// Returns `InvalidInput` on out-of-range fields, as [`Instance::new`].
    pub fn date_only(year: i32, month: u8, day: u8) -> CoreResult<Self> {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Creates an instance from a chrono date-time, dropping sub-second precision.
    ///
    /// chrono's leap-second form (nanoseconds past one second) becomes second 60.
    #[must_use]
    pub fn from_naive(dt: NaiveDateTime) -> Self {
        let second = if dt.nanosecond() >= 1_000_000_000 {
            60
        } else {
            narrow(dt.second())
        };
        Self {
            year: dt.year(),
            month: narrow(dt.month()),
            day: narrow(dt.day()),
            hour: narrow(dt.hour()),
            minute: narrow(dt.minute()),
            second,
        }
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[must_use]
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// The calendar date, or `None` if the day does not exist in its month.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, u32::from(self.month), u32::from(self.day))
    }

    /// The chrono date-time, or `None` if the date does not exist.
    ///
    /// A leap second is mapped onto chrono's leap-second representation.
    #[must_use]
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let date = self.date()?;
        if self.second == 60 {
            return date.and_hms_milli_opt(
                u32::from(self.hour),
                u32::from(self.minute),
                59,
                1_000,
            );
        }
        date.and_hms_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
        )
    }

    /// Whether the date exists in the calendar.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.date().is_some()
    }

    /// Day of the week, or `None` if the date does not exist.
    #[must_use]
    pub fn weekday(&self) -> Option<Weekday> {
        self.date().map(|date| Weekday::from_chrono(date.weekday()))
    }

    /// Same instance moved to another month of its year.
    #[must_use]
    pub fn with_month(self, month: u8) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { month, ..self })
    }

    /// Same instance moved to another day of its month.
    #[must_use]
    pub fn with_day(self, day: u8) -> Option<Self> {
        (1..=31).contains(&day).then_some(Self { day, ..self })
    }

    /// Same instance moved to another hour of its day.
    #[must_use]
    pub fn with_hour(self, hour: u8) -> Option<Self> {
        (hour <= 23).then_some(Self { hour, ..self })
    }

    /// Same time of day on another (existing) calendar date.
    #[must_use]
    pub fn with_date(self, date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: narrow(date.month()),
            day: narrow(date.day()),
            ..self
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}T{:02}{:02}{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Returns the number of days in a month (28 to 31).
#[must_use]
pub fn days_in_month(year: i32, month: u8) -> u8 {
    let (next_year, next_month) = if month >= 12 {
        (year + 1, 1)
    } else {
        (year, u32::from(month) + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| narrow(last.day()))
}

// chrono date and time components all fit in a byte.
fn narrow(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

//! Calendar-day value used for every streak comparison.
//!
//! A `CalendarDay` carries no time-of-day and no timezone. Timestamps are
//! converted into the configured day boundary first, then truncated.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A date with year/month/day only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDay(NaiveDate);

/// Where one calendar day ends and the next begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBoundary {
    /// The machine's local timezone.
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl DayBoundary {
    /// Build from an offset in minutes east of UTC.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, ValidationError> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(DayBoundary::Fixed)
            .ok_or_else(|| {
                ValidationError::invalid(
                    "utc_offset_minutes",
                    format!("{minutes} is outside -1439..=1439"),
                )
            })
    }
}

impl CalendarDay {
    /// Construct from year/month/day, rejecting impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The calendar day `dt` falls on, as seen from `boundary`.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>, boundary: DayBoundary) -> Self {
        let utc = dt.with_timezone(&Utc);
        let date = match boundary {
            DayBoundary::Local => utc.with_timezone(&Local).date_naive(),
            DayBoundary::Fixed(offset) => utc.with_timezone(&offset).date_naive(),
        };
        Self(date)
    }

    /// Today according to the system clock.
    ///
    /// The streak engine never calls this; callers resolve "today" once and
    /// pass it in.
    pub fn today(boundary: DayBoundary) -> Self {
        Self::from_datetime(&Utc::now(), boundary)
    }

    /// The previous calendar day.
    pub fn pred(self) -> Self {
        Self(self.0.pred_opt().unwrap_or(NaiveDate::MIN))
    }

    /// The next calendar day.
    pub fn succ(self) -> Self {
        Self(self.0.succ_opt().unwrap_or(NaiveDate::MAX))
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(self, earlier: CalendarDay) -> i64 {
        (self.0 - earlier.0).num_days()
    }

    /// `true` when `self` is exactly one day before `today`.
    pub fn is_yesterday_of(self, today: CalendarDay) -> bool {
        today.days_since(self) == 1
    }

    pub fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| ValidationError::invalid("date", format!("'{s}' is not YYYY-MM-DD: {e}")))
    }
}

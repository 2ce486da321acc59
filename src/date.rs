use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::{
    calendar::{resolve_local, signed},
    consts::MONTHS_PER_YEAR,
    prelude::*,
};

/// A calendar day with no time of day attached.
///
/// Dates never fail to construct: out-of-range fields roll over the way a
/// civil calendar does (day 32 of May is June 1st, month 13 is January of
/// the next year). Ordering is lexicographic on (year, month, day).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Builds a date from possibly out-of-range parts, normalizing overflow.
    pub fn from_parts(year: i32, month: i32, day: i32) -> Self {
        Self(normalize(year, month, day))
    }

    /// The local calendar day containing the unix timestamp `seconds`.
    pub fn from_timestamp(seconds: i64) -> Self {
        let utc = DateTime::from_timestamp(seconds, 0).unwrap_or(if seconds < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        });
        Self::from_datetime(&utc.with_timezone(&Local))
    }

    /// The calendar day of `t` in its own zone.
    pub fn from_datetime<Tz: TimeZone>(t: &DateTime<Tz>) -> Self {
        Self(t.date_naive())
    }

    /// Today in the local zone.
    pub fn today() -> Self {
        Self::from_datetime(&Local::now())
    }

    /// Returns the year
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month number, 1..=12
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month, 1..=31
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day of week; `num_days_from_sunday()` gives the 0=Sunday index.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Unix seconds of local midnight starting this day.
    pub fn unix(&self) -> i64 {
        self.begin_of_day().timestamp()
    }

    /// Adds years, months and days in one step, as if each field were
    /// summed first and the result normalized.
    ///
    /// Month overflow is not clamped: Jan 31 plus one month is Mar 3 (or
    /// Mar 2 in leap years).
    pub fn add(&self, years: i32, months: i32, days: i32) -> Self {
        Self::from_parts(
            self.year().saturating_add(years),
            signed(self.month()).saturating_add(months),
            signed(self.day()).saturating_add(days),
        )
    }

    /// Returns the following day. The last day chrono can represent is
    /// its own successor; use [`Date::checked_next`] to detect that.
    pub fn next(&self) -> Self {
        self.add(0, 0, 1)
    }

    /// Returns the preceding day, saturating at chrono's first day.
    pub fn prev(&self) -> Self {
        self.add(0, 0, -1)
    }

    /// Returns the following day, or `None` past chrono's last day.
    pub fn checked_next(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// Checks if this date comes strictly before `other`
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    /// Checks if this date comes strictly after `other`
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }

    /// Local midnight starting this day.
    pub fn begin_of_day(&self) -> DateTime<Local> {
        self.begin_of_day_in(&Local)
    }

    /// Midnight starting this day in `tz`.
    pub fn begin_of_day_in<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        resolve_local(tz, self.0.and_time(NaiveTime::MIN))
    }

    /// Local 23:59:59.999999999 of this day.
    pub fn end_of_day(&self) -> DateTime<Local> {
        self.end_of_day_in(&Local)
    }

    /// One nanosecond before the next midnight in `tz`.
    ///
    /// On chrono's last day there is no next midnight, so the wall clock
    /// 23:59:59.999999999 is used instead.
    pub fn end_of_day_in<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        match self.checked_next() {
            Some(next) => next.begin_of_day_in(tz) - TimeDelta::nanoseconds(1),
            None => resolve_local(tz, self.0.and_time(last_instant_of_day())),
        }
    }

    /// Checks if this date is today in the local zone
    pub fn is_today(&self) -> bool {
        *self == Self::today()
    }

    /// Checks if this date is tomorrow in the local zone
    pub fn is_tomorrow(&self) -> bool {
        *self == Self::today().next()
    }

    /// Checks if this date is yesterday in the local zone
    pub fn is_yesterday(&self) -> bool {
        *self == Self::today().prev()
    }
}

/// 23:59:59.999999999
fn last_instant_of_day() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN)
}

/// Carries month overflow into the year, then day overflow into the month.
/// Results beyond chrono's supported years saturate at its limits.
fn normalize(year: i32, month: i32, day: i32) -> NaiveDate {
    let months = i64::from(year) * i64::from(MONTHS_PER_YEAR) + i64::from(month) - 1;
    let year = months.div_euclid(i64::from(MONTHS_PER_YEAR));
    let month = months.rem_euclid(i64::from(MONTHS_PER_YEAR)) + 1;

    let first = i32::try_from(year)
        .ok()
        .zip(u32::try_from(month).ok())
        .and_then(|(y, m)| NaiveDate::from_ymd_opt(y, m, 1));
    let Some(first) = first else {
        return if year < 0 { NaiveDate::MIN } else { NaiveDate::MAX };
    };

    first
        .checked_add_signed(TimeDelta::days(i64::from(day) - 1))
        .unwrap_or(if day < 1 { NaiveDate::MIN } else { NaiveDate::MAX })
}

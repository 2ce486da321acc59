//! Gregorian calendar arithmetic and time-of-day helpers.
//!
//! Everything here is a pure function of integers or timestamps; none of it
//! can fail.

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone, Timelike};

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_LEAP_YEAR, DAYS_IN_YEAR, DECEMBER, FEBRUARY, FEBRUARY_DAYS,
    FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, LONG_MONTH_DAYS,
    MINUTES_PER_DAY, MONTH_PARITY_SHIFT, SHORT_MONTH_DAYS,
};
use crate::{Date, Month};

/// Largest nanosecond field outside of a leap second.
const MAX_NANOSECOND: u32 = 999_999_999;

/// Returns true for Gregorian leap years.
pub const fn is_leap(year: i32) -> bool {
    year % LEAP_YEAR_CYCLE == 0 && (year % CENTURY_CYCLE != 0 || year % GREGORIAN_CYCLE == 0)
}

/// Number of days in `year`: 365 or 366.
pub const fn length_of_year(year: i32) -> u32 {
    if is_leap(year) { DAYS_IN_LEAP_YEAR } else { DAYS_IN_YEAR }
}

/// Number of days in `month` (1..=12) of `year`.
///
/// Months alternate long/short by parity, and the alternation restarts at
/// August, so August..December mirror January..May.
pub const fn length_of_month(year: i32, month: u32) -> u32 {
    debug_assert!(month != 0 && month <= DECEMBER);

    if month == FEBRUARY {
        return if is_leap(year) { FEBRUARY_DAYS_LEAP } else { FEBRUARY_DAYS };
    }
    let shifted = if month > MONTH_PARITY_SHIFT { month - MONTH_PARITY_SHIFT } else { month };
    if shifted % 2 == 0 { SHORT_MONTH_DAYS } else { LONG_MONTH_DAYS }
}

/// Length of a calendar day as used for day offsets: exactly 24 hours.
pub fn day_length() -> TimeDelta {
    TimeDelta::days(1)
}

/// Offset of the last representable instant of a day: 24h minus 1ns.
pub fn end_of_day_offset() -> TimeDelta {
    day_length() - TimeDelta::nanoseconds(1)
}

/// Elapsed time since local midnight of `t`, in `[0, 24h)`.
pub fn time_of_day<Tz: TimeZone>(t: &DateTime<Tz>) -> TimeDelta {
    let seconds = i64::from(t.num_seconds_from_midnight());
    // leap seconds report nanos >= 1e9
    let nanos = i64::from(t.nanosecond().min(MAX_NANOSECOND));
    TimeDelta::seconds(seconds) + TimeDelta::nanoseconds(nanos)
}

/// Minute of the day for `t`, rounded to the nearest minute.
///
/// One nanosecond is added before rounding so the last instant of a day
/// lands on the following midnight, which wraps to 0.
pub fn day_minutes<Tz: TimeZone>(t: &DateTime<Tz>) -> u32 {
    let rounded = round_to_minute(time_of_day(t) + TimeDelta::nanoseconds(1));
    u32::try_from(rounded.num_minutes().rem_euclid(MINUTES_PER_DAY)).unwrap_or_default()
}

/// True if `t` sits exactly on local midnight.
pub fn is_begin_of_day<Tz: TimeZone>(t: &DateTime<Tz>) -> bool {
    time_of_day(t) == TimeDelta::zero()
}

/// True if `t` is the last nanosecond of its day.
pub fn is_end_of_day<Tz: TimeZone>(t: &DateTime<Tz>) -> bool {
    time_of_day(t) == end_of_day_offset()
}

/// True if `t` falls on today's date in the local zone.
pub fn is_today<Tz: TimeZone>(t: &DateTime<Tz>) -> bool {
    Date::from_datetime(&t.with_timezone(&Local)).is_today()
}

/// First instant of the month in the local zone. Month numbers past 12
/// carry into following years, 0 means December of the previous year.
pub fn begin_of_month(year: i32, month: u32) -> DateTime<Local> {
    Month::from_parts(year, month).begin()
}

/// Last instant (23:59:59.999999999) of the month in the local zone.
pub fn end_of_month(year: i32, month: u32) -> DateTime<Local> {
    Month::from_parts(year, month).end()
}

/// Rounds `d` to the nearest whole minute; halfway values round away from zero.
pub fn round_to_minute(d: TimeDelta) -> TimeDelta {
    let minute = TimeDelta::minutes(1);
    let whole = TimeDelta::minutes(d.num_minutes());
    let remainder = d - whole;
    if remainder.abs() * 2 < minute {
        whole
    } else if d < TimeDelta::zero() {
        whole - minute
    } else {
        whole + minute
    }
}

/// Attaches `tz` to a wall-clock time.
///
/// Ambiguous times take the earlier instant. Times skipped by a DST jump
/// are pushed forward by an hour; if that still fails the wall clock is
/// read as UTC.
pub(crate) fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Widens a calendar field (month, day) to the signed arithmetic domain.
pub(crate) fn signed(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

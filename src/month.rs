use chrono::{DateTime, Local, TimeZone, Weekday};

use crate::{
    Date,
    calendar::{length_of_month, signed},
    consts::{DAYS_PER_WEEK, DECEMBER, MONTHS_PER_YEAR},
    prelude::*,
};

/// A (year, month) pair with the month always normalized into 1..=12.
///
/// Any `i32` year is accepted. Instants and days of years outside chrono's
/// range saturate to its first or last representable day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year:04}-{month:02}")]
pub struct Month {
    year:  i32,
    month: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MonthError {
    #[display(fmt = "Invalid month: {_0} (must not be negative)")]
    NegativeMonth(i32),
}

impl std::error::Error for MonthError {}

impl Month {
    /// Creates a month, rolling 0 back to December of the previous year and
    /// carrying values above 12 into later years.
    ///
    /// # Errors
    /// Returns `MonthError::NegativeMonth` for negative month numbers, which
    /// have no unambiguous normalization.
    pub fn new(year: i32, month: i32) -> Result<Self, MonthError> {
        let month = u32::try_from(month).map_err(|_| MonthError::NegativeMonth(month))?;
        Ok(Self::from_parts(year, month))
    }

    /// Infallible form of [`Month::new`] for unsigned month numbers.
    pub fn from_parts(year: i32, month: u32) -> Self {
        if month == 0 {
            return Self {
                year:  year.saturating_sub(1),
                month: DECEMBER,
            };
        }
        let carry = signed((month - 1) / DECEMBER);
        Self {
            year:  year.saturating_add(carry),
            month: (month - 1) % DECEMBER + 1,
        }
    }

    /// The month containing `date`.
    pub fn of(date: &Date) -> Self {
        Self {
            year:  date.year(),
            month: date.month(),
        }
    }

    /// Returns the year
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month number, 1..=12
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> Date {
        Date::from_parts(self.year, signed(self.month), 1)
    }

    /// First instant of the month in the local zone.
    pub fn begin(&self) -> DateTime<Local> {
        self.begin_in(&Local)
    }

    /// First instant of the month in `tz`.
    pub fn begin_in<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        self.first_day().begin_of_day_in(tz)
    }

    /// Last instant of the month in the local zone, one nanosecond before
    /// the next month begins.
    pub fn end(&self) -> DateTime<Local> {
        self.end_in(&Local)
    }

    /// Last instant of the month's last day in `tz`.
    pub fn end_in<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        Date::from_parts(self.year, signed(self.month), signed(self.num_of_days())).end_of_day_in(tz)
    }

    /// Returns the number of days in the month
    pub const fn num_of_days(&self) -> u32 {
        length_of_month(self.year, self.month)
    }

    /// Rows needed to lay the month out in a grid of Sunday-first weeks.
    ///
    /// Use [`crate::Calendar::num_of_weeks`] for another week start or for
    /// memoized results.
    pub fn num_of_weeks(&self) -> u32 {
        self.num_of_weeks_from(Weekday::Sun)
    }

    /// Rows needed to lay the month out in weeks starting on `week_start`.
    pub fn num_of_weeks_from(&self, week_start: Weekday) -> u32 {
        let first = self.first_day().weekday();
        let offset = (first.num_days_from_sunday() + DAYS_PER_WEEK - week_start.num_days_from_sunday())
            % DAYS_PER_WEEK;
        let first_week = DAYS_PER_WEEK - offset;
        1 + (self.num_of_days() - first_week).div_ceil(DAYS_PER_WEEK)
    }

    /// Shifts by whole years and months; negative offsets roll backwards
    /// across year boundaries.
    pub fn add(&self, years: i32, months: i32) -> Self {
        let total = i64::from(self.year) * i64::from(MONTHS_PER_YEAR)
            + i64::from(self.month)
            - 1
            + i64::from(years) * i64::from(MONTHS_PER_YEAR)
            + i64::from(months);
        let year = total.div_euclid(i64::from(MONTHS_PER_YEAR));
        let month = total.rem_euclid(i64::from(MONTHS_PER_YEAR)) + 1;
        Self {
            year:  i32::try_from(year).unwrap_or(if year < 0 { i32::MIN } else { i32::MAX }),
            month: u32::try_from(month).unwrap_or(1),
        }
    }

    /// Signed number of months from `other` to `self`, saturating at the
    /// bounds of `i32`.
    pub fn since(&self, other: &Self) -> i32 {
        let months = (i64::from(self.year) - i64::from(other.year)) * i64::from(MONTHS_PER_YEAR)
            + i64::from(self.month)
            - i64::from(other.month);
        i32::try_from(months).unwrap_or(if months < 0 { i32::MIN } else { i32::MAX })
    }

    /// Checks if `date` falls in this month
    pub fn includes(&self, date: &Date) -> bool {
        self.year == date.year() && self.month == date.month()
    }

    /// Key used to memoize per-month values: `year * 100 + month`.
    pub(crate) fn cache_key(&self) -> i32 {
        self.year.saturating_mul(100).saturating_add(signed(self.month))
    }
}

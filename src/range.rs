use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    COMPOSITE_CLOSE, COMPOSITE_CLOSE_EXCLUSIVE, COMPOSITE_OPEN, COMPOSITE_OPEN_EXCLUSIVE, COMPOSITE_SEPARATOR,
    COMPOSITE_TIMESTAMP_FORMAT, DailyRange, DailyRangeError, Date,
    calendar::{day_length, time_of_day},
};

/// A half-open time interval `[start, end)` with `start < end`.
///
/// Calendar days are read in the zone of `start`. A `Range` is not
/// internally synchronized: callers must serialize concurrent calls to the
/// `set*` methods on one instance.
///
/// Deserialization reads `{ "start": .., "end": .. }` as-is and does not
/// re-check the ordering.
#[derive(Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = "DateTime<Tz>: Deserialize<'de>"))]
pub struct Range<Tz: TimeZone = Local> {
    start: DateTime<Tz>,
    end:   DateTime<Tz>,
}

/// Error type for range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start is not strictly before end.
    #[error("Invalid range: start ({start}) must be before end ({end})")]
    InvalidInterval {
        start: DateTime<FixedOffset>,
        end:   DateTime<FixedOffset>,
    },

    /// Composite text is not delimited or split as expected.
    #[error("Malformed range text {input:?}: {reason}")]
    MalformedText { input: String, reason: &'static str },

    /// One field of the composite text is not a timestamp.
    #[error("Invalid timestamp {field:?} in range text: {source}")]
    InvalidTimestamp {
        field:  String,
        #[source]
        source: chrono::ParseError,
    },

    /// A day slice could not be represented.
    #[error(transparent)]
    DailyBounds(#[from] DailyRangeError),
}

impl<Tz: TimeZone> Range<Tz> {
    /// Creates a new range.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidInterval` unless `start < end`.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self, RangeError> {
        check_order(&start, &end)?;
        Ok(Self { start, end })
    }

    /// The whole of `date` in `tz`, from its midnight to the next one.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidInterval` for chrono's last day, which has
    /// no following midnight.
    pub fn of_day(date: &Date, tz: &Tz) -> Result<Self, RangeError> {
        let start = date.begin_of_day_in(tz);
        let end = date
            .checked_next()
            .map_or_else(|| start.clone(), |next| next.begin_of_day_in(tz));
        Self::new(start, end)
    }

    /// Returns the start (inclusive) of the range
    pub const fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    /// Returns the end (exclusive) of the range
    pub const fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    /// Replaces both endpoints.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidInterval` and leaves the range unchanged
    /// unless `start < end`.
    pub fn set(&mut self, start: DateTime<Tz>, end: DateTime<Tz>) -> Result<(), RangeError> {
        check_order(&start, &end)?;
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Replaces the start.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidInterval` if `start` is not before the current end.
    pub fn set_start(&mut self, start: DateTime<Tz>) -> Result<(), RangeError> {
        check_order(&start, &self.end)?;
        self.start = start;
        Ok(())
    }

    /// Replaces the end.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidInterval` if `end` is not after the current start.
    pub fn set_end(&mut self, end: DateTime<Tz>) -> Result<(), RangeError> {
        check_order(&self.start, &end)?;
        self.end = end;
        Ok(())
    }

    /// True if the ranges share an instant. Ranges starting at the same
    /// instant always overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start == other.start || (self.start < other.end && other.start < self.end)
    }

    /// True if `other` lies entirely inside this range.
    pub fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Checks if `t` falls in `[start, end)`
    pub fn contains_instant(&self, t: &DateTime<Tz>) -> bool {
        self.start <= *t && *t < self.end
    }

    /// The common sub-interval, or `None` when the ranges do not meet.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let start = (&self.start).max(&other.start);
        let end = (&self.end).min(&other.end);
        (start < end).then(|| Self {
            start: start.clone(),
            end:   end.clone(),
        })
    }

    /// Returns `end - start`
    pub fn duration(&self) -> TimeDelta {
        self.end.clone() - self.start.clone()
    }

    /// True if the range covers exactly one calendar day, midnight to midnight.
    pub fn is_all_day(&self) -> bool {
        Date::from_datetime(&self.start) == self.last_date() && self.duration() == day_length()
    }

    /// Every calendar day holding at least one instant of the range, ascending.
    ///
    /// An end exactly on midnight belongs to the previous day, so it does
    /// not add the day it touches.
    pub fn dates(&self) -> Vec<Date> {
        let last = NaiveDate::from(self.last_date());
        self.start
            .date_naive()
            .iter_days()
            .take_while(|day| *day <= last)
            .map(Date::from)
            .collect()
    }

    /// Splits the range into one slice per day from [`Range::dates`].
    ///
    /// The first slice starts at the time of day of `start`, the last ends at
    /// the time of day of `end` (24h if that is midnight), and every other
    /// slice covers the whole day.
    ///
    /// # Errors
    /// Returns `RangeError::DailyBounds` when an edge slice rounds to less
    /// than a minute, such as a range starting at 23:59:45.
    pub fn split_by_day(&self) -> Result<Vec<DailyRange>, RangeError> {
        let dates = self.dates();
        let last = dates.len().saturating_sub(1);
        let end_of_last = match time_of_day(&self.end_in_start_zone()) {
            tod if tod == TimeDelta::zero() => day_length(),
            tod => tod,
        };

        let slices = dates
            .iter()
            .enumerate()
            .map(|(i, &date)| {
                let start = if i == 0 { time_of_day(&self.start) } else { TimeDelta::zero() };
                let end = if i == last { end_of_last } else { day_length() };
                DailyRange::new(date, start, end)
            })
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| debug!(%err, "range could not be split by day"))?;

        trace!(days = slices.len(), "split range into daily slices");
        Ok(slices)
    }

    fn end_in_start_zone(&self) -> DateTime<Tz> {
        self.end.with_timezone(&self.start.timezone())
    }

    fn last_date(&self) -> Date {
        let end = self.end_in_start_zone();
        let date = Date::from_datetime(&end);
        if time_of_day(&end) == TimeDelta::zero() { date.prev() } else { date }
    }
}

fn check_order<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> Result<(), RangeError> {
    if start < end {
        return Ok(());
    }
    Err(RangeError::InvalidInterval {
        start: start.fixed_offset(),
        end:   end.fixed_offset(),
    })
}

/// Formats `t` as `YYYY-MM-DD HH:MM:SS[.fraction]±HH[:MM]`.
fn composite_timestamp<Tz: TimeZone>(t: &DateTime<Tz>) -> String {
    let seconds = t.offset().fix().local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let (hours, minutes) = (seconds.abs() / 3600, seconds.abs() % 3600 / 60);
    let local = t.naive_local().format("%Y-%m-%d %H:%M:%S%.f");
    if minutes == 0 {
        format!("{local}{sign}{hours:02}")
    } else {
        format!("{local}{sign}{hours:02}:{minutes:02}")
    }
}

fn parse_composite_timestamp(field: &str) -> Result<DateTime<FixedOffset>, RangeError> {
    let field = field.trim().trim_matches('"');
    DateTime::parse_from_str(field, COMPOSITE_TIMESTAMP_FORMAT).map_err(|source| RangeError::InvalidTimestamp {
        field: field.to_owned(),
        source,
    })
}

impl<Tz: TimeZone> fmt::Display for Range<Tz> {
    /// Composite text: `[2002-05-03 17:00:00-07, 2002-05-03 18:00:00-07]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{COMPOSITE_OPEN}{}{COMPOSITE_SEPARATOR} {}{COMPOSITE_CLOSE}",
            composite_timestamp(&self.start),
            composite_timestamp(&self.end)
        )
    }
}

impl FromStr for Range<FixedOffset> {
    type Err = RangeError;

    /// Parses composite text. Either bracket style is accepted on each side
    /// and timestamps may be double-quoted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason| RangeError::MalformedText {
            input: s.to_owned(),
            reason,
        };

        let inner = s
            .trim()
            .strip_prefix(&[COMPOSITE_OPEN, COMPOSITE_OPEN_EXCLUSIVE][..])
            .and_then(|rest| rest.strip_suffix(&[COMPOSITE_CLOSE, COMPOSITE_CLOSE_EXCLUSIVE][..]))
            .ok_or_else(|| malformed("expected bracket-delimited text"))?;

        let fields: Vec<&str> = inner.split(COMPOSITE_SEPARATOR).collect();
        let [start, end] = fields.as_slice() else {
            return Err(malformed("expected exactly two comma-separated timestamps"));
        };

        Self::new(parse_composite_timestamp(start)?, parse_composite_timestamp(end)?)
    }
}

impl<Tz: TimeZone> fmt::Debug for Range<Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Range")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

impl<Tz: TimeZone> PartialEq for Range<Tz> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<Tz: TimeZone> Eq for Range<Tz> {}

impl<Tz: TimeZone> Hash for Range<Tz> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

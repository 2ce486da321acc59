use std::{cmp::Ordering, fmt};

use chrono::TimeDelta;

use crate::{
    Date,
    calendar::{day_length, end_of_day_offset, round_to_minute},
};

/// The slice of a time range that falls within one calendar day.
///
/// Bounds are offsets from that day's midnight, rounded to whole minutes.
/// The end offset may be exactly 24h, meaning the slice runs up to the next
/// midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DailyRange {
    date:  Date,
    start: TimeDelta,
    end:   TimeDelta,
}

/// Error type for daily range construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DailyRangeError {
    #[error("Invalid daily range on {date}: start offset {minutes}m is outside [0, 24h)")]
    StartOutOfDay { date: Date, minutes: i64 },

    #[error("Invalid daily range on {date}: end offset {minutes}m is outside [1m, 24h]")]
    EndOutOfDay { date: Date, minutes: i64 },

    #[error("Invalid daily range on {date}: {start_minutes}m..{end_minutes}m is shorter than one minute")]
    TooShort {
        date:          Date,
        start_minutes: i64,
        end_minutes:   i64,
    },
}

impl DailyRange {
    /// Creates a daily range after rounding both offsets to the nearest minute.
    ///
    /// # Errors
    /// Returns `DailyRangeError` if the rounded start is outside `[0, 24h)`,
    /// the rounded end is outside `[1m, 24h]`, or the span is under a minute.
    pub fn new(date: Date, start: TimeDelta, end: TimeDelta) -> Result<Self, DailyRangeError> {
        let minute = TimeDelta::minutes(1);
        let start = round_to_minute(start);
        let end = round_to_minute(end);

        if start < TimeDelta::zero() || start > end_of_day_offset() {
            return Err(DailyRangeError::StartOutOfDay {
                date,
                minutes: start.num_minutes(),
            });
        }
        if end < minute || end > day_length() {
            return Err(DailyRangeError::EndOutOfDay {
                date,
                minutes: end.num_minutes(),
            });
        }
        if end - start < minute {
            return Err(DailyRangeError::TooShort {
                date,
                start_minutes: start.num_minutes(),
                end_minutes: end.num_minutes(),
            });
        }

        Ok(Self { date, start, end })
    }

    /// Returns the calendar day of the slice
    pub const fn date(&self) -> Date {
        self.date
    }

    /// Start as (hour, minute).
    pub fn start(&self) -> (u32, u32) {
        hour_minute(self.start)
    }

    /// End as (hour, minute); (24, 0) when the slice reaches midnight.
    pub fn end(&self) -> (u32, u32) {
        hour_minute(self.end)
    }

    /// Returns the minute-rounded start as an offset from midnight
    pub const fn start_offset(&self) -> TimeDelta {
        self.start
    }

    /// Returns the minute-rounded end as an offset from midnight
    pub const fn end_offset(&self) -> TimeDelta {
        self.end
    }

    /// Displayed length of the slice. Both bounds count as inclusive
    /// minutes, so this is one minute longer than `end - start`.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start + TimeDelta::minutes(1)
    }

    /// Raw distance between the two offsets.
    pub fn span(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Checks if the slice runs from midnight to midnight
    pub fn is_all_day(&self) -> bool {
        self.span() == day_length()
    }

    /// Checks if this slice starts strictly before `other`
    pub fn starts_before(&self, other: &Self) -> bool {
        (self.date, self.start) < (other.date, other.start)
    }

    /// Checks if this slice starts strictly after `other`
    pub fn starts_after(&self, other: &Self) -> bool {
        (self.date, self.start) > (other.date, other.start)
    }

    /// Checks if this slice ends strictly before `other`
    pub fn ends_before(&self, other: &Self) -> bool {
        (self.date, self.end) < (other.date, other.end)
    }

    /// Checks if this slice ends strictly after `other`
    pub fn ends_after(&self, other: &Self) -> bool {
        (self.date, self.end) > (other.date, other.end)
    }
}

fn hour_minute(offset: TimeDelta) -> (u32, u32) {
    let minutes = u32::try_from(offset.num_minutes()).unwrap_or_default();
    (minutes / 60, minutes % 60)
}

impl fmt::Display for DailyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sh, sm) = self.start();
        let (eh, em) = self.end();
        write!(f, "{} {sh:02}:{sm:02}-{eh:02}:{em:02}", self.date)
    }
}

impl PartialOrd for DailyRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DailyRange {
    fn cmp(&self, other: &Self) -> Ordering {
        // chronological by start, then by end
        (self.date, self.start, self.end).cmp(&(other.date, other.start, other.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, hm};

    #[test]
    fn test_new_rounds_to_minute() {
        let d = date(2002, 5, 3);
        let r = DailyRange::new(d, hm(17, 0) + TimeDelta::seconds(29), hm(18, 0) + TimeDelta::seconds(30)).unwrap();
        assert_eq!(r.start(), (17, 0));
        assert_eq!(r.end(), (18, 1));
        assert_eq!(r.start_offset(), hm(17, 0));
    }

    #[test]
    fn test_new_validation_cases() {
        struct TestCase {
            start:          TimeDelta,
            end:            TimeDelta,
            should_succeed: bool,
            description:    &'static str,
        }

        let cases = [
            TestCase {
                start:          hm(0, 0),
                end:            hm(24, 0),
                should_succeed: true,
                description:    "whole day",
            },
            TestCase {
                start:          hm(0, 0),
                end:            hm(0, 1),
                should_succeed: true,
                description:    "first minute",
            },
            TestCase {
                start:          hm(23, 59),
                end:            hm(24, 0),
                should_succeed: true,
                description:    "last minute",
            },
            TestCase {
                start:          -TimeDelta::minutes(1),
                end:            hm(1, 0),
                should_succeed: false,
                description:    "negative start",
            },
            TestCase {
                start:          hm(24, 0),
                end:            hm(24, 0),
                should_succeed: false,
                description:    "start at next midnight",
            },
            TestCase {
                start:          hm(0, 0),
                end:            hm(24, 1),
                should_succeed: false,
                description:    "end past next midnight",
            },
            TestCase {
                start:          hm(0, 0),
                end:            TimeDelta::seconds(20),
                should_succeed: false,
                description:    "end rounds to zero",
            },
            TestCase {
                start:          hm(10, 0),
                end:            hm(10, 0) + TimeDelta::seconds(25),
                should_succeed: false,
                description:    "span under a minute",
            },
            TestCase {
                start:          hm(11, 0),
                end:            hm(10, 0),
                should_succeed: false,
                description:    "inverted",
            },
        ];

        for case in &cases {
            let result = DailyRange::new(date(2002, 5, 3), case.start, case.end);
            assert_eq!(result.is_ok(), case.should_succeed, "{}", case.description);
        }
    }

    #[test]
    fn test_too_short_for_any_start() {
        for start_minute in [0, 1, 59, 600, 1438] {
            let start = TimeDelta::minutes(start_minute);
            for extra_secs in [0, 10, 29] {
                let end = start + TimeDelta::seconds(extra_secs);
                assert!(DailyRange::new(date(2002, 5, 3), start, end).is_err());
            }
        }
    }

    #[test]
    fn test_error_kinds() {
        let d = date(2002, 5, 3);
        assert_eq!(
            DailyRange::new(d, hm(10, 0), hm(10, 0)),
            Err(DailyRangeError::TooShort {
                date:          d,
                start_minutes: 600,
                end_minutes:   600,
            })
        );
        assert!(matches!(
            DailyRange::new(d, hm(0, 0), hm(25, 0)),
            Err(DailyRangeError::EndOutOfDay { minutes: 1500, .. })
        ));
        let err = DailyRange::new(d, -hm(1, 0), hm(1, 0)).unwrap_err();
        assert!(err.to_string().contains("2002-05-03"));
    }

    #[test]
    fn test_duration_and_all_day() {
        let d = date(2002, 5, 3);
        let hour = DailyRange::new(d, hm(17, 0), hm(18, 0)).unwrap();
        assert_eq!(hour.duration(), hm(1, 1));
        assert_eq!(hour.span(), hm(1, 0));
        assert!(!hour.is_all_day());

        let whole = DailyRange::new(d, hm(0, 0), hm(24, 0)).unwrap();
        assert!(whole.is_all_day());
        assert_eq!(whole.end(), (24, 0));
    }

    #[test]
    fn test_ordering_predicates() {
        let a = DailyRange::new(date(2002, 5, 3), hm(9, 0), hm(10, 0)).unwrap();
        let b = DailyRange::new(date(2002, 5, 3), hm(9, 30), hm(9, 45)).unwrap();
        let c = DailyRange::new(date(2002, 5, 4), hm(0, 0), hm(1, 0)).unwrap();

        assert!(a.starts_before(&b));
        assert!(b.starts_after(&a));
        assert!(b.ends_before(&a));
        assert!(a.ends_after(&b));
        assert!(b.starts_before(&c));
        assert!(c.ends_after(&a));
        assert!(!a.starts_before(&a));

        let mut sorted = vec![c, b, a];
        sorted.sort();
        assert_eq!(sorted, vec![a, b, c]);
    }

    #[test]
    fn test_display() {
        let r = DailyRange::new(date(2002, 5, 3), hm(23, 30), hm(24, 0)).unwrap();
        assert_eq!(r.to_string(), "2002-05-03 23:30-24:00");
    }
}

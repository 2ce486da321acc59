//! Display text for times and dates.
//!
//! The locale is always passed in by the caller; nothing here reads the
//! process environment.

use chrono::{DateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::{Date, calendar::is_end_of_day};

/// Language of generated display text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    English,
    SimplifiedChinese,
}

/// Padding of the hour in clock text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeStyle {
    /// `5:07`
    #[default]
    Plain,
    /// `05:07`
    ZeroPadded,
    /// ` 5:07`
    SpacePadded,
}

impl TimeStyle {
    fn clock(self, hour: u32, minute: u32) -> String {
        match self {
            Self::Plain => format!("{hour}:{minute:02}"),
            Self::ZeroPadded => format!("{hour:02}:{minute:02}"),
            Self::SpacePadded => format!("{hour:>2}:{minute:02}"),
        }
    }
}

const fn midnight_text(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Midnight",
        Locale::SimplifiedChinese => "晚上12:00",
    }
}

/// Twelve-hour clock text for `t`, e.g. `5:00PM` or `下午5:00`.
/// The last instant of a day reads as midnight.
pub fn time_text<Tz: TimeZone>(t: &DateTime<Tz>, style: TimeStyle, locale: Locale) -> String {
    if is_end_of_day(t) {
        return midnight_text(locale).to_owned();
    }
    clock_text(t.hour(), t.minute(), style, locale)
}

/// Twelve-hour clock text for an hour and minute of the day. Hour 24 (the
/// end bound of a slice reaching the next day) reads as midnight.
pub fn clock_text(hour: u32, minute: u32, style: TimeStyle, locale: Locale) -> String {
    if hour >= 24 {
        return midnight_text(locale).to_owned();
    }
    match locale {
        Locale::English => match hour {
            0 => format!("{}AM", style.clock(12, minute)),
            1..=11 => format!("{}AM", style.clock(hour, minute)),
            12 => format!("{}PM", style.clock(hour, minute)),
            _ => format!("{}PM", style.clock(hour - 12, minute)),
        },
        Locale::SimplifiedChinese => match hour {
            0 => format!("00:{minute:02}"),
            1..=11 => format!("上午{}", style.clock(hour, minute)),
            12 => format!("中午{}", style.clock(hour, minute)),
            _ => format!("下午{}", style.clock(hour - 12, minute)),
        },
    }
}

/// `YYYY-MM-DD`
pub fn date_text(date: &Date) -> String {
    date.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, pdt};
    use chrono::TimeDelta;

    #[test]
    fn test_english_time_text() {
        struct TestCase {
            hour:     u32,
            minute:   u32,
            style:    TimeStyle,
            expected: &'static str,
        }

        let cases = [
            TestCase {
                hour:     0,
                minute:   5,
                style:    TimeStyle::Plain,
                expected: "12:05AM",
            },
            TestCase {
                hour:     9,
                minute:   30,
                style:    TimeStyle::Plain,
                expected: "9:30AM",
            },
            TestCase {
                hour:     9,
                minute:   30,
                style:    TimeStyle::ZeroPadded,
                expected: "09:30AM",
            },
            TestCase {
                hour:     9,
                minute:   30,
                style:    TimeStyle::SpacePadded,
                expected: " 9:30AM",
            },
            TestCase {
                hour:     12,
                minute:   0,
                style:    TimeStyle::Plain,
                expected: "12:00PM",
            },
            TestCase {
                hour:     17,
                minute:   0,
                style:    TimeStyle::Plain,
                expected: "5:00PM",
            },
            TestCase {
                hour:     24,
                minute:   0,
                style:    TimeStyle::Plain,
                expected: "Midnight",
            },
        ];

        for case in &cases {
            assert_eq!(clock_text(case.hour, case.minute, case.style, Locale::English), case.expected);
        }
    }

    #[test]
    fn test_chinese_time_text() {
        let zh = Locale::SimplifiedChinese;
        assert_eq!(clock_text(0, 5, TimeStyle::Plain, zh), "00:05");
        assert_eq!(clock_text(9, 30, TimeStyle::Plain, zh), "上午9:30");
        assert_eq!(clock_text(12, 15, TimeStyle::Plain, zh), "中午12:15");
        assert_eq!(clock_text(17, 0, TimeStyle::ZeroPadded, zh), "下午05:00");
        assert_eq!(clock_text(24, 0, TimeStyle::Plain, zh), "晚上12:00");
    }

    #[test]
    fn test_time_text_from_timestamp() {
        let t = pdt(2002, 5, 3, 17, 0);
        assert_eq!(time_text(&t, TimeStyle::Plain, Locale::English), "5:00PM");

        let last = pdt(2002, 5, 4, 0, 0) - TimeDelta::nanoseconds(1);
        assert_eq!(time_text(&last, TimeStyle::Plain, Locale::English), "Midnight");
        assert_eq!(time_text(&last, TimeStyle::Plain, Locale::SimplifiedChinese), "晚上12:00");
    }

    #[test]
    fn test_date_text() {
        assert_eq!(date_text(&date(2002, 5, 3)), "2002-05-03");
    }
}

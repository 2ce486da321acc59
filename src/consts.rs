/// Month number for January
pub const JANUARY: u32 = 1;
/// Month number for February
pub const FEBRUARY: u32 = 2;
/// Month number for December
pub const DECEMBER: u32 = 12;

/// Number of months in a year
pub const MONTHS_PER_YEAR: i32 = 12;
/// Number of days in a week
pub const DAYS_PER_WEEK: u32 = 7;

/// Days in a common (non-leap) year
pub const DAYS_IN_YEAR: u32 = 365;
/// Days in a leap year
pub const DAYS_IN_LEAP_YEAR: u32 = 366;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u32 = 29;
/// Days in February for common years
pub const FEBRUARY_DAYS: u32 = 28;
/// Length of a "long" month
pub const LONG_MONTH_DAYS: u32 = 31;
/// Length of a "short" month other than February
pub const SHORT_MONTH_DAYS: u32 = 30;

/// Months after July restart the 31/30 alternation (August is long again)
pub(crate) const MONTH_PARITY_SHIFT: u32 = 7;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Minutes in one day
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Opening delimiter of the composite range text
pub const COMPOSITE_OPEN: char = '[';
/// Opening delimiter accepted for exclusive-start composite text
pub const COMPOSITE_OPEN_EXCLUSIVE: char = '(';
/// Closing delimiter of the composite range text
pub const COMPOSITE_CLOSE: char = ']';
/// Closing delimiter accepted for exclusive-end composite text
pub const COMPOSITE_CLOSE_EXCLUSIVE: char = ')';
/// Separator between the two timestamps of the composite range text
pub const COMPOSITE_SEPARATOR: char = ',';

/// Timestamp layout used inside the composite range text.
/// `%#z` accepts both `-07` and `-07:00` when parsing.
pub const COMPOSITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%#z";

//! Calendar arithmetic, day and month values, and time ranges that split
//! into per-day slices.
//!
//! ```
//! use calrange::Range;
//! use chrono::{FixedOffset, TimeZone};
//!
//! let tz = FixedOffset::west_opt(7 * 3600).unwrap();
//! let range = Range::new(
//!     tz.with_ymd_and_hms(2002, 5, 3, 23, 30, 0).unwrap(),
//!     tz.with_ymd_and_hms(2002, 5, 5, 1, 15, 0).unwrap(),
//! )
//! .unwrap();
//!
//! let slices = range.split_by_day().unwrap();
//! assert_eq!(slices.len(), 3);
//! assert!(slices[1].is_all_day());
//! assert_eq!(slices[2].end(), (1, 15));
//! ```

pub mod calendar;
mod config;
mod consts;
mod daily;
mod date;
pub mod format;
mod month;
mod prelude;
mod range;

pub use config::{Calendar, CalendarConfig, WeekCountCache};
pub use consts::*;
pub use daily::{DailyRange, DailyRangeError};
pub use date::Date;
pub use format::{Locale, TimeStyle};
pub use month::{Month, MonthError};
pub use range::{Range, RangeError};

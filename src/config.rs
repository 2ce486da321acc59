//! Calendar configuration and the context object that carries it.

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use chrono::{DateTime, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    Date, Month,
    format::{Locale, TimeStyle, clock_text, date_text, time_text},
};

/// Settings for week layout and display text.
///
/// Every field has a default, so partial documents deserialize.
///
/// # Example
///
/// ```
/// use calrange::{CalendarConfig, Locale};
/// use chrono::Weekday;
///
/// let config = CalendarConfig::new()
///     .with_week_start(Weekday::Mon)
///     .with_locale(Locale::SimplifiedChinese);
/// assert_eq!(config.week_start(), Weekday::Mon);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    week_start: Weekday,
    locale:     Locale,
    time_style: TimeStyle,
}

impl CalendarConfig {
    /// Defaults: Sunday-first weeks, English, plain clock text.
    pub const fn new() -> Self {
        Self {
            week_start: Weekday::Sun,
            locale:     Locale::English,
            time_style: TimeStyle::Plain,
        }
    }

    /// Sets the first day of a display week.
    pub const fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    /// Sets the display language.
    pub const fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Sets the clock padding.
    pub const fn with_time_style(mut self, time_style: TimeStyle) -> Self {
        self.time_style = time_style;
        self
    }

    /// Returns the first day of a display week
    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Returns the display language
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns the clock padding
    pub const fn time_style(&self) -> TimeStyle {
        self.time_style
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Memoized week counts keyed by `year * 100 + month`.
///
/// Entries are never invalidated. Concurrent misses may compute the same
/// entry twice, which is harmless because the value is a pure function of
/// the key.
#[derive(Debug)]
pub struct WeekCountCache {
    week_start: Weekday,
    weeks:      RwLock<HashMap<i32, u32>>,
}

impl WeekCountCache {
    /// Creates an empty cache for weeks starting on `week_start`.
    pub fn new(week_start: Weekday) -> Self {
        Self {
            week_start,
            weeks: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the first day of a display week
    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Week rows for `month`, computing and storing them on a miss.
    pub fn num_of_weeks(&self, month: &Month) -> u32 {
        let key = month.cache_key();
        if let Some(&weeks) = self.weeks.read().unwrap_or_else(PoisonError::into_inner).get(&key) {
            return weeks;
        }

        let weeks = month.num_of_weeks_from(self.week_start);
        trace!(%month, weeks, "week count cache miss");
        self.weeks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, weeks);
        weeks
    }

    /// Returns the number of memoized months
    pub fn len(&self) -> usize {
        self.weeks.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Checks if nothing has been memoized yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for WeekCountCache {
    fn default() -> Self {
        Self::new(Weekday::Sun)
    }
}

/// Long-lived context owning a [`CalendarConfig`] and its week-count cache.
///
/// `Calendar` is `Sync`; share one behind an `Arc` to share the cache.
#[derive(Debug, Default)]
pub struct Calendar {
    config: CalendarConfig,
    weeks:  WeekCountCache,
}

impl Calendar {
    /// Creates a calendar with an empty week cache.
    pub fn new(config: CalendarConfig) -> Self {
        Self {
            config,
            weeks: WeekCountCache::new(config.week_start()),
        }
    }

    /// Returns the configuration the calendar was built from
    pub const fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Week rows for `month` using the configured week start, memoized.
    pub fn num_of_weeks(&self, month: &Month) -> u32 {
        self.weeks.num_of_weeks(month)
    }

    /// Clock text for `t` in the configured locale and style.
    pub fn time_text<Tz: TimeZone>(&self, t: &DateTime<Tz>) -> String {
        time_text(t, self.config.time_style(), self.config.locale())
    }

    /// Clock text for an (hour, minute) pair such as a `DailyRange` bound.
    pub fn clock_text(&self, (hour, minute): (u32, u32)) -> String {
        clock_text(hour, minute, self.config.time_style(), self.config.locale())
    }

    /// Date text for `date` in the configured locale.
    pub fn date_text(&self, date: &Date) -> String {
        date_text(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DailyRange,
        test_utils::{date, hm, month, pdt},
    };
    use std::{sync::Arc, thread};

    #[test]
    fn test_config_defaults() {
        let config = CalendarConfig::default();
        assert_eq!(config.week_start(), Weekday::Sun);
        assert_eq!(config.locale(), Locale::English);
        assert_eq!(config.time_style(), TimeStyle::Plain);
    }

    #[test]
    fn test_config_partial_json() {
        let config: CalendarConfig = serde_json::from_str(r#"{"week_start":"Mon"}"#).unwrap();
        assert_eq!(config, CalendarConfig::new().with_week_start(Weekday::Mon));

        let config: CalendarConfig =
            serde_json::from_str(r#"{"locale":"simplified_chinese","time_style":"zero_padded"}"#).unwrap();
        assert_eq!(config.locale(), Locale::SimplifiedChinese);
        assert_eq!(config.time_style(), TimeStyle::ZeroPadded);
        assert_eq!(config.week_start(), Weekday::Sun);
    }

    #[test]
    fn test_cache_memoizes() {
        let calendar = Calendar::default();
        assert!(calendar.weeks.is_empty());

        assert_eq!(calendar.num_of_weeks(&month(2015, 2)), 4);
        assert_eq!(calendar.num_of_weeks(&month(2015, 2)), 4);
        assert_eq!(calendar.weeks.len(), 1);

        assert_eq!(calendar.num_of_weeks(&month(2015, 8)), 6);
        assert_eq!(calendar.weeks.len(), 2);
    }

    #[test]
    fn test_cache_respects_week_start() {
        let calendar = Calendar::new(CalendarConfig::new().with_week_start(Weekday::Mon));
        assert_eq!(calendar.num_of_weeks(&month(2015, 2)), 5);
    }

    #[test]
    fn test_cache_shared_across_threads() {
        let calendar = Arc::new(Calendar::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let calendar = Arc::clone(&calendar);
                thread::spawn(move || {
                    (1..=12)
                        .map(|m| calendar.num_of_weeks(&month(2002, m)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let expected: Vec<u32> = (1..=12).map(|m| month(2002, m).num_of_weeks()).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
        assert_eq!(calendar.weeks.len(), 12);
    }

    #[test]
    fn test_text_uses_config() {
        let zh = Calendar::new(CalendarConfig::new().with_locale(Locale::SimplifiedChinese));
        assert_eq!(zh.time_text(&pdt(2002, 5, 3, 17, 0)), "下午5:00");

        let en = Calendar::default();
        let slice = DailyRange::new(date(2002, 5, 3), hm(23, 30), hm(24, 0)).unwrap();
        assert_eq!(en.clock_text(slice.start()), "11:30PM");
        assert_eq!(en.clock_text(slice.end()), "Midnight");
        assert_eq!(en.date_text(&slice.date()), "2002-05-03");
    }
}

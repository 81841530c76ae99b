//! Holiday calendar for the operative year.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use configs::CalendarConfig;

use crate::errors::ServiceError;

#[derive(Clone, Debug)]
pub struct HolidayCalendar {
    year: i32,
    dates: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    pub fn new(year: i32, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self { year, dates: dates.into_iter().collect() }
    }

    pub fn from_config(cfg: &CalendarConfig) -> Self {
        Self::new(cfg.year, cfg.holidays.iter().copied())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn holidays(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Reject a date that falls on a holiday.
    pub fn ensure_not_holiday(&self, date: NaiveDate) -> Result<(), ServiceError> {
        if self.is_holiday(date) {
            return Err(ServiceError::Holiday(date));
        }
        Ok(())
    }

    /// Weekdays in `start..=end` that are not holidays.
    pub fn work_days(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .filter(|d| !self.is_holiday(*d))
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::date;

    fn default_calendar() -> HolidayCalendar {
        HolidayCalendar::from_config(&CalendarConfig::default())
    }

    #[test]
    fn default_calendar_knows_national_holidays() {
        let cal = default_calendar();
        assert_eq!(cal.year(), 2026);
        assert!(cal.is_holiday(date(2026, 4, 25)));
        assert!(cal.is_holiday(date(2026, 12, 25)));
        assert!(!cal.is_holiday(date(2026, 4, 24)));
        assert_eq!(cal.holidays().count(), 13);
    }

    #[test]
    fn ensure_not_holiday_rejects_exact_match() {
        let cal = HolidayCalendar::new(2026, [date(2026, 6, 10)]);
        assert!(matches!(cal.ensure_not_holiday(date(2026, 6, 10)), Err(ServiceError::Holiday(d)) if d == date(2026, 6, 10)));
        assert!(cal.ensure_not_holiday(date(2026, 6, 11)).is_ok());
    }

    #[test]
    fn work_days_skip_weekends_and_holidays() {
        let cal = default_calendar();
        // Mon 3 Aug .. Fri 7 Aug 2026
        assert_eq!(cal.work_days(date(2026, 8, 3), date(2026, 8, 7)), 5);
        // Mon 10 .. Sun 16 Aug, Sat 15 Aug is a holiday but already a weekend
        assert_eq!(cal.work_days(date(2026, 8, 10), date(2026, 8, 16)), 5);
        // Mon 7 .. Fri 11 Dec, Tue 8 Dec is a holiday
        assert_eq!(cal.work_days(date(2026, 12, 7), date(2026, 12, 11)), 4);
        // single Saturday
        assert_eq!(cal.work_days(date(2026, 8, 8), date(2026, 8, 8)), 0);
    }

    #[test]
    fn reversed_range_counts_nothing() {
        let cal = default_calendar();
        assert_eq!(cal.work_days(date(2026, 8, 7), date(2026, 8, 3)), 0);
    }
}

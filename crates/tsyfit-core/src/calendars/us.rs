//! US federal holiday calendar for government securities.

use chrono::Weekday;

use super::Calendar;
use crate::types::Date;

/// US federal holiday calendar.
///
/// Covers the holidays observed by the Treasury market: New Year's
/// Day, MLK Day, Presidents Day, Good Friday, Memorial Day,
/// Independence Day, Labor Day, Columbus Day, Veterans Day,
/// Thanksgiving, and Christmas. Fixed-date holidays falling on a
/// weekend are observed on the nearest weekday (Saturday -> Friday,
/// Sunday -> Monday).
#[derive(Debug, Clone, Copy, Default)]
pub struct USCalendar;

impl USCalendar {
    /// Returns true if the date is a US federal holiday (observed).
    fn is_federal_holiday(&self, date: Date) -> bool {
        let year = date.year();
        let month = date.month();

        // Fixed-date holidays with weekend observation
        if is_observed_fixed_holiday(date, 1, 1) // New Year's Day
            || is_observed_fixed_holiday(date, 7, 4) // Independence Day
            || is_observed_fixed_holiday(date, 11, 11) // Veterans Day
            || is_observed_fixed_holiday(date, 12, 25)
        // Christmas Day
        {
            return true;
        }

        // MLK Day: 3rd Monday in January
        if month == 1 && is_nth_weekday(date, Weekday::Mon, 3) {
            return true;
        }

        // Presidents Day: 3rd Monday in February
        if month == 2 && is_nth_weekday(date, Weekday::Mon, 3) {
            return true;
        }

        // Good Friday: two days before Easter Sunday
        if date == good_friday(year) {
            return true;
        }

        // Memorial Day: last Monday in May
        if month == 5 && is_last_weekday(date, Weekday::Mon) {
            return true;
        }

        // Labor Day: 1st Monday in September
        if month == 9 && is_nth_weekday(date, Weekday::Mon, 1) {
            return true;
        }

        // Columbus Day: 2nd Monday in October
        if month == 10 && is_nth_weekday(date, Weekday::Mon, 2) {
            return true;
        }

        // Thanksgiving: 4th Thursday in November
        if month == 11 && is_nth_weekday(date, Weekday::Thu, 4) {
            return true;
        }

        false
    }
}

impl Calendar for USCalendar {
    fn name(&self) -> &'static str {
        "US Federal"
    }

    fn is_business_day(&self, date: Date) -> bool {
        if date.is_weekend() {
            return false;
        }
        !self.is_federal_holiday(date)
    }
}

/// Returns true if `date` is the observed occurrence of a fixed
/// month/day holiday, shifted Saturday -> Friday, Sunday -> Monday.
fn is_observed_fixed_holiday(date: Date, month: u32, day: u32) -> bool {
    let Ok(holiday) = Date::from_ymd(date.year(), month, day) else {
        return false;
    };

    let observed = match holiday.weekday() {
        Weekday::Sat => holiday.add_days(-1),
        Weekday::Sun => holiday.add_days(1),
        _ => holiday,
    };

    // Jan 1 on a Saturday is observed Dec 31 of the prior year; check
    // the following year's holiday as well so that date is caught.
    if date == observed {
        return true;
    }
    if month == 1 && day == 1 && date.month() == 12 && date.day() == 31 {
        if let Ok(next_new_year) = Date::from_ymd(date.year() + 1, 1, 1) {
            return next_new_year.weekday() == Weekday::Sat && date.weekday() == Weekday::Fri;
        }
    }

    false
}

/// Returns true if date is the nth occurrence of weekday in its month.
fn is_nth_weekday(date: Date, weekday: Weekday, n: u32) -> bool {
    if date.weekday() != weekday {
        return false;
    }
    (date.day() - 1) / 7 + 1 == n
}

/// Returns true if date is the last occurrence of weekday in its month.
fn is_last_weekday(date: Date, weekday: Weekday) -> bool {
    if date.weekday() != weekday {
        return false;
    }
    date.add_days(7).month() != date.month()
}

/// Computes Good Friday for a year: Easter Sunday minus two days.
///
/// Easter Sunday via the anonymous Gregorian (Gauss) algorithm.
fn good_friday(year: i32) -> Date {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    Date::from_ymd(year, month as u32, day as u32)
        .expect("Gauss algorithm yields a valid March/April date")
        .add_days(-2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend() {
        let cal = USCalendar;

        assert!(!cal.is_business_day(Date::from_ymd(2025, 1, 4).unwrap())); // Sat
        assert!(!cal.is_business_day(Date::from_ymd(2025, 1, 5).unwrap())); // Sun
        assert!(cal.is_business_day(Date::from_ymd(2025, 1, 6).unwrap())); // Mon
    }

    #[test]
    fn test_new_years_observed() {
        let cal = USCalendar;

        // 2025: Jan 1 is a Wednesday
        assert!(!cal.is_business_day(Date::from_ymd(2025, 1, 1).unwrap()));

        // 2023: Jan 1 is a Sunday, observed Monday Jan 2
        assert!(!cal.is_business_day(Date::from_ymd(2023, 1, 2).unwrap()));

        // 2022: Jan 1 is a Saturday, observed Friday Dec 31, 2021
        assert!(!cal.is_business_day(Date::from_ymd(2021, 12, 31).unwrap()));
    }

    #[test]
    fn test_mlk_day() {
        let cal = USCalendar;

        // 2025: MLK Day is Jan 20 (3rd Monday)
        assert!(!cal.is_business_day(Date::from_ymd(2025, 1, 20).unwrap()));
        assert!(cal.is_business_day(Date::from_ymd(2025, 1, 17).unwrap()));
        assert!(cal.is_business_day(Date::from_ymd(2025, 1, 21).unwrap()));
    }

    #[test]
    fn test_good_friday() {
        let cal = USCalendar;

        // 2025: Easter is April 20, Good Friday is April 18
        assert!(!cal.is_business_day(Date::from_ymd(2025, 4, 18).unwrap()));
        // 2024: Easter is March 31, Good Friday is March 29
        assert!(!cal.is_business_day(Date::from_ymd(2024, 3, 29).unwrap()));
        // The preceding Thursdays trade
        assert!(cal.is_business_day(Date::from_ymd(2025, 4, 17).unwrap()));
    }

    #[test]
    fn test_memorial_day() {
        let cal = USCalendar;

        // 2025: Memorial Day is May 26 (last Monday)
        assert!(!cal.is_business_day(Date::from_ymd(2025, 5, 26).unwrap()));
    }

    #[test]
    fn test_independence_day_observed() {
        let cal = USCalendar;

        // 2025: July 4 is a Friday
        assert!(!cal.is_business_day(Date::from_ymd(2025, 7, 4).unwrap()));

        // 2026: July 4 is a Saturday, observed Friday July 3
        assert!(!cal.is_business_day(Date::from_ymd(2026, 7, 3).unwrap()));

        // 2021: July 4 is a Sunday, observed Monday July 5
        assert!(!cal.is_business_day(Date::from_ymd(2021, 7, 5).unwrap()));
    }

    #[test]
    fn test_labor_columbus_veterans() {
        let cal = USCalendar;

        // 2025: Labor Day Sep 1, Columbus Day Oct 13, Veterans Day Nov 11
        assert!(!cal.is_business_day(Date::from_ymd(2025, 9, 1).unwrap()));
        assert!(!cal.is_business_day(Date::from_ymd(2025, 10, 13).unwrap()));
        assert!(!cal.is_business_day(Date::from_ymd(2025, 11, 11).unwrap()));
    }

    #[test]
    fn test_thanksgiving_and_christmas() {
        let cal = USCalendar;

        // 2025: Thanksgiving is Nov 27 (4th Thursday)
        assert!(!cal.is_business_day(Date::from_ymd(2025, 11, 27).unwrap()));
        assert!(!cal.is_business_day(Date::from_ymd(2025, 12, 25).unwrap()));

        // 2021: Christmas on Saturday, observed Friday Dec 24
        assert!(!cal.is_business_day(Date::from_ymd(2021, 12, 24).unwrap()));
    }

    #[test]
    fn test_ordinary_day_is_business_day() {
        let cal = USCalendar;
        assert!(cal.is_business_day(Date::from_ymd(2025, 11, 19).unwrap()));
    }
}

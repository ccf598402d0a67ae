//! Business day calendars.

mod us;

pub use us::USCalendar;

use crate::types::Date;

/// A business day calendar.
pub trait Calendar {
    /// Returns the calendar's name.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns the smallest business day strictly after `date`.
    fn next_business_day(&self, date: Date) -> Date {
        let mut current = date.add_days(1);
        while !self.is_business_day(current) {
            current = current.add_days(1);
        }
        current
    }
}

/// Returns the default settlement date for a calendar.
///
/// Today when today is a business day, otherwise the next business day.
/// Used when an as-of date is not supplied with a pricing request.
#[must_use]
pub fn default_settlement_date(calendar: &impl Calendar) -> Date {
    let today = Date::today();
    if calendar.is_business_day(today) {
        today
    } else {
        calendar.next_business_day(today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_business_day_skips_weekend() {
        let cal = USCalendar;

        // Friday 2025-01-03 -> Monday 2025-01-06
        let friday = Date::from_ymd(2025, 1, 3).unwrap();
        assert_eq!(
            cal.next_business_day(friday),
            Date::from_ymd(2025, 1, 6).unwrap()
        );
    }

    #[test]
    fn test_next_business_day_is_strictly_greater() {
        let cal = USCalendar;

        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        assert_eq!(
            cal.next_business_day(monday),
            Date::from_ymd(2025, 1, 7).unwrap()
        );
    }
}

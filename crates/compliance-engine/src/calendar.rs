use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Tennessee court calendar for checking summons appearance dates
pub struct TennesseeCourtCalendar;

impl TennesseeCourtCalendar {
    /// Add court days to a date, excluding weekends and Tennessee state holidays
    ///
    /// Returns `None` only if the date range overflows.
    pub fn add_business_days(start_date: NaiveDate, days: u32) -> Option<NaiveDate> {
        let mut current_date = start_date;
        let mut remaining_days = days;

        while remaining_days > 0 {
            current_date = current_date.succ_opt()?;

            if Self::is_business_day(current_date) {
                remaining_days -= 1;
            }
        }

        Some(current_date)
    }

    /// First court day on or after the date
    pub fn next_business_day(date: NaiveDate) -> Option<NaiveDate> {
        let mut current = date;
        while !Self::is_business_day(current) {
            current = current.succ_opt()?;
        }
        Some(current)
    }

    /// Check if a date is a court day (not weekend or holiday)
    pub fn is_business_day(date: NaiveDate) -> bool {
        !Self::is_weekend(date) && !Self::is_holiday(date)
    }

    pub fn is_weekend(date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Check if a date is a Tennessee state holiday (observed date)
    pub fn is_holiday(date: NaiveDate) -> bool {
        Self::holiday_name(date).is_some()
    }

    pub fn holiday_name(date: NaiveDate) -> Option<&'static str> {
        // Observed New Year's Day can fall in the previous December
        [date.year(), date.year() + 1]
            .into_iter()
            .flat_map(Self::holidays)
            .find(|(d, _)| *d == date)
            .map(|(_, name)| name)
    }

    /// Observed Tennessee state holidays for a year
    pub fn holidays(year: i32) -> Vec<(NaiveDate, &'static str)> {
        let mut holidays = Vec::new();

        // Fixed date holidays move to Friday or Monday when on a weekend
        let fixed = [
            (1, 1, "New Year's Day"),
            (7, 4, "Independence Day"),
            (11, 11, "Veterans Day"),
            (12, 25, "Christmas Day"),
        ];
        for (month, day, name) in fixed {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                holidays.push((Self::observed(date), name));
            }
        }

        let floating = [
            (Self::nth_weekday_of_month(year, 1, Weekday::Mon, 3), "Martin Luther King Jr. Day"),
            (Self::nth_weekday_of_month(year, 2, Weekday::Mon, 3), "Presidents' Day"),
            (Self::good_friday(year), "Good Friday"),
            (Self::last_weekday_of_month(year, 5, Weekday::Mon), "Memorial Day"),
            (Self::nth_weekday_of_month(year, 9, Weekday::Mon, 1), "Labor Day"),
            (Self::nth_weekday_of_month(year, 11, Weekday::Thu, 4), "Thanksgiving Day"),
            (
                Self::nth_weekday_of_month(year, 11, Weekday::Thu, 4).and_then(|d| d.succ_opt()),
                "Day after Thanksgiving",
            ),
        ];
        holidays.extend(
            floating
                .into_iter()
                .filter_map(|(date, name)| date.map(|d| (d, name))),
        );

        holidays.sort();
        holidays
    }

    fn observed(date: NaiveDate) -> NaiveDate {
        match date.weekday() {
            Weekday::Sat => date - Duration::days(1),
            Weekday::Sun => date + Duration::days(1),
            _ => date,
        }
    }

    /// Easter Sunday (anonymous Gregorian algorithm) minus two days
    fn good_friday(year: i32) -> Option<NaiveDate> {
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

        let easter = NaiveDate::from_ymd_opt(year, month as u32, day as u32)?;
        easter.checked_sub_signed(Duration::days(2))
    }

    /// Get the nth occurrence of a weekday in a month
    fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<NaiveDate> {
        NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
    }

    /// Get the last occurrence of a weekday in a month
    fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
        // Start from the last day of the month and work backwards
        let last_day = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?.pred_opt()?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?.pred_opt()?
        };

        let mut current = last_day;
        while current.month() == month {
            if current.weekday() == weekday {
                return Some(current);
            }
            current = current.pred_opt()?;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_business_days_excludes_weekends() {
        // Friday plus three court days is Wednesday
        let deadline = TennesseeCourtCalendar::add_business_days(ymd(2024, 1, 5), 3);
        assert_eq!(deadline, Some(ymd(2024, 1, 10)));
    }

    #[test]
    fn test_excludes_memorial_day() {
        // Skip Sat, Sun, Memorial Day Monday = Tuesday May 28, Wed 29, Thu 30
        let deadline = TennesseeCourtCalendar::add_business_days(ymd(2024, 5, 24), 3);
        assert_eq!(deadline, Some(ymd(2024, 5, 30)));
    }

    #[test]
    fn test_good_friday() {
        assert_eq!(TennesseeCourtCalendar::holiday_name(ymd(2024, 3, 29)), Some("Good Friday"));
        assert_eq!(TennesseeCourtCalendar::holiday_name(ymd(2025, 4, 18)), Some("Good Friday"));
        assert!(!TennesseeCourtCalendar::is_holiday(ymd(2024, 3, 28)));
    }

    #[test]
    fn test_floating_holidays_2024() {
        for date in [
            ymd(2024, 1, 15),  // MLK
            ymd(2024, 2, 19),  // Presidents' Day
            ymd(2024, 9, 2),   // Labor Day
            ymd(2024, 11, 28), // Thanksgiving
            ymd(2024, 11, 29), // day after
        ] {
            assert!(TennesseeCourtCalendar::is_holiday(date), "{} should be a holiday", date);
        }
    }

    #[test]
    fn test_weekend_holidays_are_observed() {
        // July 4, 2026 is a Saturday
        assert!(TennesseeCourtCalendar::is_holiday(ymd(2026, 7, 3)));
        // Christmas 2022 was a Sunday
        assert!(TennesseeCourtCalendar::is_holiday(ymd(2022, 12, 26)));
        // New Year's Day 2022 was a Saturday, observed Dec 31, 2021
        assert_eq!(
            TennesseeCourtCalendar::holiday_name(ymd(2021, 12, 31)),
            Some("New Year's Day")
        );
    }

    #[test]
    fn test_next_business_day() {
        // Saturday before MLK Day 2024 rolls to Tuesday
        assert_eq!(
            TennesseeCourtCalendar::next_business_day(ymd(2024, 1, 13)),
            Some(ymd(2024, 1, 16))
        );
        assert_eq!(
            TennesseeCourtCalendar::next_business_day(ymd(2024, 3, 4)),
            Some(ymd(2024, 3, 4))
        );
    }

    #[test]
    fn test_regular_day_is_business_day() {
        assert!(TennesseeCourtCalendar::is_business_day(ymd(2024, 3, 5)));
        assert!(!TennesseeCourtCalendar::is_business_day(ymd(2024, 3, 9)));
    }
}

use shared_types::{DocumentType, Issue};

use super::DocumentContext;
use crate::calendar::TennesseeCourtCalendar;
use crate::extractors::fields::{COURT_DATE, OFFENSE_DATE};
use crate::extractors::find_date;

/// A summons must set an appearance on a court day after the offense
pub fn check_court_date(ctx: &DocumentContext<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();
    if ctx.doc_type != DocumentType::CriminalSummons {
        return issues;
    }

    let Some(value) = ctx.field(COURT_DATE) else {
        issues.push(
            Issue::error(COURT_DATE, "Summons does not state a court appearance date.")
                .with_suggestion("Add the date and time the defendant must appear."),
        );
        return issues;
    };

    let Some(court_date) = find_date(value) else {
        issues.push(
            Issue::error(COURT_DATE, format!("Court date '{}' is not a valid date.", value))
                .with_suggestion("Use MM/DD/YYYY format."),
        );
        return issues;
    };

    let display = court_date.format("%m/%d/%Y");
    let closed_reason = match TennesseeCourtCalendar::holiday_name(court_date) {
        Some(holiday) => Some(format!("{}, a Tennessee state holiday", holiday)),
        None if TennesseeCourtCalendar::is_weekend(court_date) => {
            Some(format!("a {}", court_date.format("%A")))
        }
        None => None,
    };
    if let Some(reason) = closed_reason {
        let mut issue = Issue::warning(
            COURT_DATE,
            format!("Court date {} falls on {}.", display, reason),
        );
        if let Some(next) = TennesseeCourtCalendar::next_business_day(court_date) {
            issue = issue.with_suggestion(format!(
                "Schedule the appearance for the next court day, {}.",
                next.format("%m/%d/%Y")
            ));
        }
        issues.push(issue);
    }

    if let Some(offense_date) = ctx.field(OFFENSE_DATE).and_then(find_date) {
        if court_date < offense_date {
            issues.push(Issue::error(
                COURT_DATE,
                format!(
                    "Court date {} precedes the offense date {}.",
                    display,
                    offense_date.format("%m/%d/%Y")
                ),
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use shared_types::Severity;

    fn check(text: &str) -> Vec<Issue> {
        let today = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        check_court_date(&DocumentContext::new(text, DocumentType::CriminalSummons, today))
    }

    #[test]
    fn test_weekday_court_date_passes() {
        assert!(check("Offense Date: 02/01/2024\nCourt Date: 03/05/2024 at 9:00 AM").is_empty());
    }

    #[test]
    fn test_missing_court_date() {
        let issues = check("CRIMINAL SUMMONS");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_weekend_court_date() {
        let issues = check("Court Date: 03/09/2024");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Court date 03/09/2024 falls on a Saturday.");
        assert_eq!(
            issues[0].suggestion.as_deref(),
            Some("Schedule the appearance for the next court day, 03/11/2024.")
        );
    }

    #[test]
    fn test_holiday_court_date() {
        let issues = check("Court Date: 05/27/2024");
        assert_eq!(
            issues[0].message,
            "Court date 05/27/2024 falls on Memorial Day, a Tennessee state holiday."
        );
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_court_date_before_offense() {
        let issues = check("Offense Date: 02/01/2024\nCourt Date: 01/16/2024");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("precedes the offense date 02/01/2024"));
    }
}

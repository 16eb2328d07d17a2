use shared_types::{DocumentType, Issue, Severity};

use super::DocumentContext;
use crate::extractors::fields::{OFFENSE, OFFENSE_DATE};
use crate::extractors::find_date;

/// Offense description and date of offense
pub fn check_offense(ctx: &DocumentContext<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();

    if ctx.field(OFFENSE).is_none() {
        // A search warrant may describe the offense only in its narrative
        let severity = match ctx.doc_type {
            DocumentType::SearchWarrant => Severity::Warning,
            _ => Severity::Error,
        };
        issues.push(
            Issue::new(severity, OFFENSE, "Offense charged is not stated.")
                .with_suggestion("Name the offense as it appears in the Tennessee Code."),
        );
    }

    match ctx.field(OFFENSE_DATE) {
        None => issues.push(
            Issue::warning(OFFENSE_DATE, "Offense date is missing.")
                .with_suggestion("State the date the offense occurred."),
        ),
        Some(value) => match find_date(value) {
            None => issues.push(
                Issue::warning(
                    OFFENSE_DATE,
                    format!("Offense date '{}' is not a valid date.", value),
                )
                .with_suggestion("Use MM/DD/YYYY format."),
            ),
            Some(date) if date > ctx.today => issues.push(
                Issue::error(
                    OFFENSE_DATE,
                    format!("Offense date {} is in the future.", date.format("%m/%d/%Y")),
                )
                .with_suggestion("Correct the date of the offense."),
            ),
            Some(_) => {}
        },
    }

    issues
}

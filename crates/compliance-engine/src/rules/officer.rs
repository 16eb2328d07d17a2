use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{DocumentType, Issue};

use super::DocumentContext;
use crate::extractors::fields::{AFFIANT, AGENCY, OFFICER};

lazy_static! {
    /// "#4521" or "Badge 4521" within an officer's name line
    static ref INLINE_BADGE: Regex =
        Regex::new(r"(?i)#\s*\d+|\bbadge\s*(?:no\.?|number|#)?\s*:?\s*\d+").unwrap();

    /// Separate "Badge No.: 4521" line
    static ref BADGE_LINE: Regex =
        Regex::new(r"(?im)^[ \t]*badge\s*(?:no\.?|number|#)?[ \t]*:[ \t]*\S").unwrap();
}

/// Identity of the officer or affiant and their agency
pub fn check_officer(ctx: &DocumentContext<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();

    let officer = match ctx.doc_type {
        DocumentType::AffidavitOfComplaint => ctx.field(AFFIANT).or_else(|| ctx.field(OFFICER)),
        _ => ctx.field(OFFICER),
    };

    match officer {
        None if ctx.doc_type == DocumentType::AffidavitOfComplaint => issues.push(
            Issue::error(AFFIANT, "Affidavit does not identify the affiant.")
                .with_suggestion("Name the officer swearing to the affidavit."),
        ),
        None => issues.push(
            Issue::warning(OFFICER, "Officer name is missing.")
                .with_suggestion("Identify the arresting or complaining officer."),
        ),
        Some(name) if !INLINE_BADGE.is_match(name) && !BADGE_LINE.is_match(ctx.text) => {
            issues.push(
                Issue::info(OFFICER, "Officer badge number is missing.")
                    .with_suggestion("Include the officer's badge number."),
            )
        }
        Some(_) => {}
    }

    if ctx.field(AGENCY).is_none() {
        issues.push(
            Issue::warning(AGENCY, "Law enforcement agency is missing.")
                .with_suggestion("Name the agency the officer serves, e.g. the county sheriff's office."),
        );
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared_types::Severity;

    fn check(text: &str, doc_type: DocumentType) -> Vec<Issue> {
        let today = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        check_officer(&DocumentContext::new(text, doc_type, today))
    }

    #[test]
    fn test_officer_with_badge_and_agency() {
        let text = "Officer: Deputy James Wilson #4521\nAgency: Tipton County Sheriff's Office";
        assert!(check(text, DocumentType::ArrestWarrant).is_empty());
    }

    #[test]
    fn test_badge_on_separate_line() {
        let text = "Officer: Deputy James Wilson\nBadge No.: 4521\nAgency: Tipton County Sheriff's Office";
        assert!(check(text, DocumentType::CriminalSummons).is_empty());
    }

    #[test]
    fn test_missing_badge_is_info() {
        let text = "Officer: Deputy James Wilson\nAgency: Tipton County Sheriff's Office";
        let issues = check(text, DocumentType::ArrestWarrant);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Info);
    }

    #[test]
    fn test_affidavit_requires_affiant() {
        let issues = check("Agency: Covington Police Department", DocumentType::AffidavitOfComplaint);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, AFFIANT);
        assert_eq!(issues[0].severity, Severity::Error);

        let issues = check("Agency: Covington Police Department", DocumentType::ArrestWarrant);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_affiant_counts_as_officer() {
        let text = "Affiant: Det. Lisa Park, Badge 3310\nAgency: Covington Police Department";
        assert!(check(text, DocumentType::AffidavitOfComplaint).is_empty());
    }
}

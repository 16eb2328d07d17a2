use shared_types::Issue;

use super::{requires_probable_cause, DocumentContext};
use crate::extractors::has_date_or_time;
use crate::patterns::MIN_PROBABLE_CAUSE_WORDS;

pub const FIELD: &str = "Probable Cause Statement";

/// Probable cause must state specific facts: a date or time and enough narrative
pub fn check_probable_cause(ctx: &DocumentContext<'_>) -> Vec<Issue> {
    if !requires_probable_cause(ctx.doc_type) {
        return Vec::new();
    }

    match ctx.probable_cause.as_deref() {
        None => vec![Issue::error(FIELD, "Probable cause statement is missing.")
            .with_suggestion(
                "Add a probable cause section describing the facts that support the charge.",
            )],
        Some(statement) if !has_specific_facts(statement) => vec![Issue::error(
            FIELD,
            "Probable cause statement is missing specific facts supporting the alleged offense.",
        )
        .with_suggestion(
            "Include specific dates, times, and factual observations that establish probable cause.",
        )],
        Some(_) => Vec::new(),
    }
}

pub fn has_specific_facts(statement: &str) -> bool {
    statement.split_whitespace().count() >= MIN_PROBABLE_CAUSE_WORDS
        && has_date_or_time(statement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared_types::{DocumentType, Severity};

    fn check(text: &str, doc_type: DocumentType) -> Vec<Issue> {
        let today = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        check_probable_cause(&DocumentContext::new(text, doc_type, today))
    }

    #[test]
    fn test_missing_statement() {
        let issues = check("ARREST WARRANT\nDefendant: John Doe", DocumentType::ArrestWarrant);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Probable cause statement is missing.");
    }

    #[test]
    fn test_vague_statement() {
        let issues = check(
            "Probable Cause: The defendant took property from the store without paying.",
            DocumentType::ArrestWarrant,
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].field, FIELD);
        assert!(issues[0].message.contains("missing specific facts"));
    }

    #[test]
    fn test_specific_statement_passes() {
        let text = "Probable Cause: On 01/28/2024 at approximately 10:30 PM, the defendant \
                    removed a television valued at $1,249 from the Walmart on Highway 51 \
                    and left the store without paying, as recorded on store surveillance video.";
        assert!(check(text, DocumentType::AffidavitOfComplaint).is_empty());
    }

    #[test]
    fn test_summons_does_not_require_statement() {
        assert!(check("CRIMINAL SUMMONS", DocumentType::CriminalSummons).is_empty());
    }
}

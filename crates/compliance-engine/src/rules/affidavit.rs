use shared_types::{DocumentType, Issue};

use super::DocumentContext;
use crate::patterns::{contains_any, OATH_KEYWORDS};

pub const FIELD: &str = "Oath";

/// An affidavit of complaint must be sworn
pub fn check_oath(ctx: &DocumentContext<'_>) -> Vec<Issue> {
    if ctx.doc_type != DocumentType::AffidavitOfComplaint
        || contains_any(&ctx.text_lower, OATH_KEYWORDS)
    {
        return Vec::new();
    }

    vec![Issue::error(FIELD, "Affidavit lacks oath or affirmation language.")
        .with_suggestion("Add a jurat: \"Sworn to and subscribed before me on [date].\"")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn check(text: &str, doc_type: DocumentType) -> Vec<Issue> {
        let today = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        check_oath(&DocumentContext::new(text, doc_type, today))
    }

    #[test]
    fn test_unsworn_affidavit() {
        let issues = check("AFFIDAVIT OF COMPLAINT\nSigned: Det. Lisa Park", DocumentType::AffidavitOfComplaint);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].severity.blocks_filing());
    }

    #[test]
    fn test_sworn_affidavit() {
        let text = "AFFIDAVIT OF COMPLAINT\nSworn to and subscribed before me this 3rd day of February, 2024.";
        assert!(check(text, DocumentType::AffidavitOfComplaint).is_empty());
    }

    #[test]
    fn test_only_affidavits_need_oath() {
        assert!(check("CRIMINAL SUMMONS", DocumentType::CriminalSummons).is_empty());
    }
}

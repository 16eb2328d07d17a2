//! Compliance rules for Tennessee criminal process documents
//!
//! Each rule group inspects a `DocumentContext` and returns the issues it
//! finds. `check_all` runs the groups in report order.

pub mod affidavit;
pub mod citation;
pub mod defendant;
pub mod offense;
pub mod officer;
pub mod probable_cause;
pub mod search_warrant;
pub mod summons;
pub mod warrant;

use chrono::NaiveDate;
use shared_types::{DocumentType, ExtractedData, Issue};

use crate::extractors::{extract_fields, probable_cause as find_probable_cause};

/// Everything a rule needs to know about one document
#[derive(Debug, Clone)]
pub struct DocumentContext<'a> {
    pub text: &'a str,
    pub text_lower: String,
    pub doc_type: DocumentType,
    pub fields: ExtractedData,
    pub probable_cause: Option<String>,
    /// Reference date for "in the future" checks
    pub today: NaiveDate,
}

impl<'a> DocumentContext<'a> {
    pub fn new(text: &'a str, doc_type: DocumentType, today: NaiveDate) -> Self {
        Self {
            text,
            text_lower: text.to_lowercase(),
            doc_type,
            fields: extract_fields(text, doc_type),
            probable_cause: find_probable_cause(text),
            today,
        }
    }

    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields.get(label)
    }
}

/// Types that must carry a probable cause statement
pub fn requires_probable_cause(doc_type: DocumentType) -> bool {
    !matches!(doc_type, DocumentType::CriminalSummons)
}

/// Run every rule group in report order
pub fn check_all(ctx: &DocumentContext<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(probable_cause::check_probable_cause(ctx));
    issues.extend(citation::check_offense_citation(ctx));
    issues.extend(defendant::check_defendant(ctx));
    issues.extend(offense::check_offense(ctx));
    issues.extend(officer::check_officer(ctx));
    issues.extend(affidavit::check_oath(ctx));
    issues.extend(warrant::check_issuing_official(ctx));
    issues.extend(summons::check_court_date(ctx));
    issues.extend(search_warrant::check_search_scope(ctx));
    issues
}

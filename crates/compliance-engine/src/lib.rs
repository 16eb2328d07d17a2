pub mod calendar;
pub mod classify;
pub mod extractors;
pub mod offenses;
pub mod patterns;
pub mod report;
pub mod rules;
pub mod suggestions;

use chrono::NaiveDate;
use shared_types::{AnalysisResult, DocumentType, Issue};
use thiserror::Error;
use tracing::{debug, info};

pub use calendar::TennesseeCourtCalendar;
pub use classify::classify;
pub use offenses::{Offense, OFFENSES};
pub use report::render_report;
pub use rules::DocumentContext;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Document type not recognized; expected one of: Arrest Warrant, Affidavit of Complaint, Criminal Summons, Search Warrant")]
    UnrecognizedDocumentType,
}

/// ComplianceEngine entry point
pub struct ComplianceEngine;

impl ComplianceEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn supported_types(&self) -> &'static [DocumentType] {
        &DocumentType::ALL
    }

    /// Classify the text and check it against the rules for its type
    pub fn analyze_text(
        &self,
        text: &str,
        today: NaiveDate,
    ) -> Result<AnalysisResult, EngineError> {
        let doc_type = classify(text).ok_or(EngineError::UnrecognizedDocumentType)?;
        Ok(self.analyze_as(text, doc_type, today))
    }

    /// Check text as a known document type, skipping classification
    pub fn analyze_as(&self, text: &str, doc_type: DocumentType, today: NaiveDate) -> AnalysisResult {
        let ctx = DocumentContext::new(text, doc_type, today);
        let issues = rules::check_all(&ctx);
        let suggestions = suggestions::collect_suggestions(&ctx);
        debug!(
            "Extracted {} fields from {} ({} issues)",
            ctx.fields.len(),
            doc_type,
            issues.len()
        );

        let result = AnalysisResult::new(doc_type, issues, suggestions, ctx.fields);
        info!(
            "Analyzed {}: score {}, compliant {}",
            doc_type,
            result.score(),
            result.compliant()
        );
        result
    }

    /// Rule issues only (for testing)
    pub fn check_text(&self, text: &str, doc_type: DocumentType, today: NaiveDate) -> Vec<Issue> {
        rules::check_all(&DocumentContext::new(text, doc_type, today))
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new()
    }
}

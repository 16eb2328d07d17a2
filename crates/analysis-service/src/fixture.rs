//! Canned reference analysis used for demos and UI development

use std::time::Duration;

use async_trait::async_trait;
use document_intake::Upload;
use shared_types::{AnalysisResult, DocumentType, ExtractedData, Issue};
use tracing::debug;

use crate::analyzer::ComplianceAnalyzer;
use crate::error::AnalysisError;

/// Simulated processing time of the reference analysis
pub const DEFAULT_FIXTURE_DELAY: Duration = Duration::from_millis(3000);

/// The reference analysis of the John Michael Smith arrest warrant
pub fn sample_analysis() -> AnalysisResult {
    let issues = vec![
        Issue::error(
            "Probable Cause Statement",
            "Probable cause statement is missing specific facts supporting the alleged offense.",
        )
        .with_suggestion(
            "Include specific dates, times, and factual observations that establish probable cause.",
        ),
        Issue::warning(
            "Offense Code",
            "TCA citation format may be incorrect. Found '39-14-103' but expected 'T.C.A. § 39-14-103'.",
        )
        .with_suggestion("Use full citation format: T.C.A. § [title]-[chapter]-[section]"),
        Issue::info(
            "Defendant Address",
            "Defendant address is incomplete (missing ZIP code).",
        )
        .with_suggestion("Include complete mailing address with ZIP code for service purposes."),
    ];

    let suggestions = vec![
        "Add witness names if available to strengthen probable cause.".to_string(),
        "Include the specific value of property for theft charges.".to_string(),
        "Verify defendant's date of birth against state records.".to_string(),
    ];

    let extracted_data: ExtractedData = [
        ("Defendant Name", "John Michael Smith"),
        ("Date of Birth", "05/15/1985"),
        ("Offense", "Theft of Property over $1,000"),
        ("Offense Date", "01/28/2024"),
        ("Officer", "Deputy James Wilson #4521"),
        ("Agency", "Tipton County Sheriff's Office"),
    ]
    .into_iter()
    .collect();

    AnalysisResult::new(DocumentType::ArrestWarrant, issues, suggestions, extracted_data)
}

/// Returns `sample_analysis()` for every upload after a fixed delay
#[derive(Debug, Clone)]
pub struct FixtureAnalyzer {
    delay: Duration,
}

impl FixtureAnalyzer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixtureAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_FIXTURE_DELAY)
    }
}

#[async_trait]
impl ComplianceAnalyzer for FixtureAnalyzer {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn analyze(&self, upload: Upload) -> Result<AnalysisResult, AnalysisError> {
        debug!("Fixture analysis of {} ({:?})", upload.filename(), self.delay);
        tokio::time::sleep(self.delay).await;
        Ok(sample_analysis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use document_intake::DEFAULT_MAX_UPLOAD_BYTES;
    use pretty_assertions::assert_eq;
    use shared_types::Severity;

    #[test]
    fn test_sample_matches_reference_values() {
        let result = sample_analysis();
        assert!(!result.compliant());
        assert_eq!(result.score(), 78);
        assert_eq!(result.document_type(), DocumentType::ArrestWarrant);
        assert_eq!(result.count(Severity::Error), 1);
        assert_eq!(result.count(Severity::Warning), 1);
        assert_eq!(result.count(Severity::Info), 1);
        assert_eq!(result.suggestions().len(), 3);
        assert_eq!(result.extracted_data().len(), 6);
    }

    #[test]
    fn test_sample_serializes_like_ui_payload() {
        let json = serde_json::to_value(sample_analysis()).unwrap();
        assert_eq!(json["documentType"], "Arrest Warrant");
        assert_eq!(json["issues"][1]["severity"], "warning");
        assert_eq!(json["extractedData"]["Agency"], "Tipton County Sheriff's Office");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixture_waits_for_delay() {
        let upload = Upload::new(
            "warrant.pdf",
            b"%PDF-1.5\n%fixture".to_vec(),
            DEFAULT_MAX_UPLOAD_BYTES,
        )
        .unwrap();
        let start = tokio::time::Instant::now();
        let result = FixtureAnalyzer::default().analyze(upload).await.unwrap();
        assert!(start.elapsed() >= DEFAULT_FIXTURE_DELAY);
        assert_eq!(result, sample_analysis());
    }
}

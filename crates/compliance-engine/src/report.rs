//! Plain-text compliance report

use shared_types::{AnalysisResult, Severity};

/// Render the downloadable report for an analysis
pub fn render_report(result: &AnalysisResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Compliance Report: {}\n", result.document_type()));
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    output.push_str(&format!("Compliance Score: {}%\n", result.score()));
    output.push_str(&format!("Status: {}\n", result.status_line()));
    output.push_str(&format!(
        "Issues: {} errors, {} warnings, {} info\n\n",
        result.count(Severity::Error),
        result.count(Severity::Warning),
        result.count(Severity::Info)
    ));

    if !result.extracted_data().is_empty() {
        output.push_str("Extracted Information:\n");
        output.push_str(&"-".repeat(40));
        output.push('\n');
        for (label, value) in result.extracted_data().iter() {
            output.push_str(&format!("  {}: {}\n", label, value));
        }
        output.push('\n');
    }

    output.push_str(&format!("Issues Found ({}):\n", result.issues().len()));
    output.push_str(&"-".repeat(40));
    output.push('\n');
    if result.issues().is_empty() {
        output.push_str("✓ No issues found\n");
    }
    for issue in result.issues() {
        let marker = match issue.severity {
            Severity::Error => "✗ ERROR",
            Severity::Warning => "⚠ WARNING",
            Severity::Info => "ℹ INFO",
        };
        output.push_str(&format!("{} [{}] {}\n", marker, issue.field, issue.message));
        if let Some(suggestion) = &issue.suggestion {
            output.push_str(&format!("    Suggestion: {}\n", suggestion));
        }
    }

    if !result.suggestions().is_empty() {
        output.push_str("\nSuggestions:\n");
        output.push_str(&"-".repeat(40));
        output.push('\n');
        for suggestion in result.suggestions() {
            output.push_str(&format!("  - {}\n", suggestion));
        }
    }

    output
}

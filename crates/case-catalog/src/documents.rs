//! Processed filings listing

use chrono::NaiveDateTime;
use serde::Serialize;
use shared_types::{Document, DocumentStatus, FilingType};
use thiserror::Error;

const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Sample document {id} has an invalid timestamp '{value}'")]
    InvalidTimestamp { id: String, value: String },
}

fn row(
    id: &str,
    filing_type: FilingType,
    defendant: &str,
    officer: &str,
    badge: &str,
    status: DocumentStatus,
    created_at: &str,
    offense: &str,
) -> Result<Document, CatalogError> {
    let created_at = NaiveDateTime::parse_from_str(created_at, CREATED_AT_FORMAT).map_err(|_| {
        CatalogError::InvalidTimestamp {
            id: id.to_string(),
            value: created_at.to_string(),
        }
    })?;

    Ok(Document {
        id: id.to_string(),
        filing_type,
        defendant: defendant.to_string(),
        officer: officer.to_string(),
        badge: badge.to_string(),
        status,
        created_at,
        offense: offense.to_string(),
    })
}

/// Sample filings shown on the documents page, newest first
pub fn sample_documents() -> Result<Vec<Document>, CatalogError> {
    use DocumentStatus::*;
    use FilingType::*;

    [
        row("W-2024-0147", ArrestWarrant, "Smith, John M.", "Dep. James Wilson", "#4521", Compliant, "2024-02-03T14:30:00", "Theft of Property > $1,000"),
        row("A-2024-0203", Affidavit, "Williams, Marcus T.", "Dep. Sarah Davis", "#3892", PendingReview, "2024-02-03T11:15:00", "Aggravated Assault"),
        row("S-2024-0198", CriminalSummons, "Brown, Robert L.", "Dep. Michael Miller", "#2156", Filed, "2024-02-02T16:45:00", "Disorderly Conduct"),
        row("W-2024-0145", ArrestWarrant, "Garcia, Thomas A.", "Dep. William Johnson", "#4102", IssuesFound, "2024-02-02T09:20:00", "Domestic Assault"),
        row("A-2024-0201", Affidavit, "Davis, Jennifer K.", "Dep. James Wilson", "#4521", Compliant, "2024-02-01T13:00:00", "Vandalism > $500"),
        row("W-2024-0143", ArrestWarrant, "Martinez, Carlos R.", "Dep. Lisa Anderson", "#3567", Filed, "2024-02-01T10:30:00", "DUI - First Offense"),
        row("S-2024-0195", CriminalSummons, "Taylor, Brandon J.", "Dep. Robert Clark", "#2890", Compliant, "2024-01-31T15:15:00", "Simple Possession"),
        row("W-2024-0141", ArrestWarrant, "Jackson, David M.", "Dep. Sarah Davis", "#3892", Filed, "2024-01-31T08:45:00", "Burglary"),
    ]
    .into_iter()
    .collect()
}

/// Search and filter criteria for the documents listing
///
/// The search text matches case number, defendant or officer,
/// case-insensitively; an empty search matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub search: String,
    pub status: Option<DocumentStatus>,
    pub filing_type: Option<FilingType>,
}

impl DocumentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    pub fn status(mut self, status: DocumentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn filing_type(mut self, filing_type: FilingType) -> Self {
        self.filing_type = Some(filing_type);
        self
    }

    pub fn matches(&self, doc: &Document) -> bool {
        let query = self.search.to_lowercase();
        let matches_search = doc.id.to_lowercase().contains(&query)
            || doc.defendant.to_lowercase().contains(&query)
            || doc.officer.to_lowercase().contains(&query);
        let matches_status = self.status.map_or(true, |s| doc.status == s);
        let matches_type = self.filing_type.map_or(true, |t| doc.filing_type == t);

        matches_search && matches_status && matches_type
    }

    /// Matching rows in listing order
    pub fn apply<'a>(&self, docs: &'a [Document]) -> Vec<&'a Document> {
        docs.iter().filter(|d| self.matches(d)).collect()
    }
}

/// Counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub total: usize,
    pub compliant: usize,
    pub pending_review: usize,
    pub issues_found: usize,
    pub filed: usize,
}

impl DocumentStats {
    pub fn from_documents(docs: &[Document]) -> Self {
        let count = |status: DocumentStatus| docs.iter().filter(|d| d.status == status).count();
        Self {
            total: docs.len(),
            compliant: count(DocumentStatus::Compliant),
            pending_review: count(DocumentStatus::PendingReview),
            issues_found: count(DocumentStatus::IssuesFound),
            filed: count(DocumentStatus::Filed),
        }
    }
}

impl From<&[Document]> for DocumentStats {
    fn from(docs: &[Document]) -> Self {
        Self::from_documents(docs)
    }
}

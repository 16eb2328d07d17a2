//! Dashboard records: processed filings and document templates

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Filing category shown in the documents listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingType {
    #[serde(rename = "Arrest Warrant")]
    ArrestWarrant,
    #[serde(rename = "Affidavit")]
    Affidavit,
    #[serde(rename = "Criminal Summons")]
    CriminalSummons,
}

impl FilingType {
    pub const ALL: [FilingType; 3] = [
        FilingType::ArrestWarrant,
        FilingType::Affidavit,
        FilingType::CriminalSummons,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilingType::ArrestWarrant => "Arrest Warrant",
            FilingType::Affidavit => "Affidavit",
            FilingType::CriminalSummons => "Criminal Summons",
        }
    }
}

impl fmt::Display for FilingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilingType::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown filing type '{}'", s))
    }
}

/// Review status of a processed filing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    Compliant,
    #[serde(rename = "Pending Review")]
    PendingReview,
    #[serde(rename = "Issues Found")]
    IssuesFound,
    Filed,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 4] = [
        DocumentStatus::Compliant,
        DocumentStatus::PendingReview,
        DocumentStatus::IssuesFound,
        DocumentStatus::Filed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DocumentStatus::Compliant => "Compliant",
            DocumentStatus::PendingReview => "Pending Review",
            DocumentStatus::IssuesFound => "Issues Found",
            DocumentStatus::Filed => "Filed",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentStatus::ALL
            .into_iter()
            .find(|st| st.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown document status '{}'", s))
    }
}

/// A previously processed filing (read-only listing row)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Agency-assigned case number, e.g. "W-2024-0147"
    pub id: String,
    #[serde(rename = "type")]
    pub filing_type: FilingType,
    pub defendant: String,
    pub officer: String,
    pub badge: String,
    pub status: DocumentStatus,
    /// Local time, no zone
    pub created_at: NaiveDateTime,
    pub offense: String,
}

/// Template category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Warrant,
    Affidavit,
    Summons,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [
        TemplateKind::Warrant,
        TemplateKind::Affidavit,
        TemplateKind::Summons,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Warrant => "warrant",
            TemplateKind::Affidavit => "affidavit",
            TemplateKind::Summons => "summons",
        }
    }

    /// Filing label shown on template cards
    pub fn label(self) -> &'static str {
        self.filing_type().label()
    }

    pub fn filing_type(self) -> FilingType {
        match self {
            TemplateKind::Warrant => FilingType::ArrestWarrant,
            TemplateKind::Affidavit => FilingType::Affidavit,
            TemplateKind::Summons => FilingType::CriminalSummons,
        }
    }
}

impl FromStr for TemplateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown template type '{}'", s))
    }
}

/// A named generation blueprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TemplateKind,
    /// Relative display string ("Today", "2 days ago")
    pub last_used: String,
    pub uses: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_serializes_like_listing_row() {
        let doc = Document {
            id: "W-2024-0147".to_string(),
            filing_type: FilingType::ArrestWarrant,
            defendant: "Smith, John M.".to_string(),
            officer: "Dep. James Wilson".to_string(),
            badge: "#4521".to_string(),
            status: DocumentStatus::PendingReview,
            created_at: NaiveDateTime::parse_from_str("2024-02-03T14:30:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            offense: "Theft of Property > $1,000".to_string(),
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "Arrest Warrant");
        assert_eq!(json["status"], "Pending Review");
        assert_eq!(json["createdAt"], "2024-02-03T14:30:00");
    }

    #[test]
    fn test_status_and_type_parse_case_insensitively() {
        assert_eq!(
            "issues found".parse::<DocumentStatus>().unwrap(),
            DocumentStatus::IssuesFound
        );
        assert_eq!(
            "AFFIDAVIT".parse::<FilingType>().unwrap(),
            FilingType::Affidavit
        );
        assert!("Archived".parse::<DocumentStatus>().is_err());
    }

    #[test]
    fn test_template_kind_labels() {
        assert_eq!(TemplateKind::Warrant.label(), "Arrest Warrant");
        assert_eq!(TemplateKind::Summons.label(), "Criminal Summons");
        assert_eq!("affidavit".parse::<TemplateKind>().unwrap(), TemplateKind::Affidavit);
    }
}

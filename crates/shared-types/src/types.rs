use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Blocking impact of a detected defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be resolved before filing
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Only errors block filing
    pub fn blocks_filing(self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Points deducted from the compliance score per issue
    pub fn penalty(self) -> u32 {
        match self {
            Severity::Error => 15,
            Severity::Warning => 5,
            Severity::Info => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    /// Document field the issue pertains to (free text)
    pub field: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Issue {
    pub fn new(severity: Severity, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, field, message)
    }

    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, field, message)
    }

    pub fn info(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, field, message)
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Court document types the analyzer can classify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "Arrest Warrant")]
    ArrestWarrant,
    #[serde(rename = "Affidavit of Complaint")]
    AffidavitOfComplaint,
    #[serde(rename = "Criminal Summons")]
    CriminalSummons,
    #[serde(rename = "Search Warrant")]
    SearchWarrant,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::ArrestWarrant,
        DocumentType::AffidavitOfComplaint,
        DocumentType::CriminalSummons,
        DocumentType::SearchWarrant,
    ];

    /// Display name used on the wire and in reports
    pub fn name(self) -> &'static str {
        match self {
            DocumentType::ArrestWarrant => "Arrest Warrant",
            DocumentType::AffidavitOfComplaint => "Affidavit of Complaint",
            DocumentType::CriminalSummons => "Criminal Summons",
            DocumentType::SearchWarrant => "Search Warrant",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DocumentType::ArrestWarrant => "Standard TN arrest warrant",
            DocumentType::AffidavitOfComplaint => "Sworn probable cause statement",
            DocumentType::CriminalSummons => "Misdemeanor notice to appear",
            DocumentType::SearchWarrant => "Property search authorization",
        }
    }

    /// Snake-case identifier accepted by the API
    pub fn api_value(self) -> &'static str {
        match self {
            DocumentType::ArrestWarrant => "arrest_warrant",
            DocumentType::AffidavitOfComplaint => "affidavit",
            DocumentType::CriminalSummons => "summons",
            DocumentType::SearchWarrant => "search_warrant",
        }
    }

    pub fn is_warrant(self) -> bool {
        matches!(
            self,
            DocumentType::ArrestWarrant | DocumentType::SearchWarrant
        )
    }

    /// Whether the document names a defendant (a search warrant names premises)
    pub fn names_defendant(self) -> bool {
        !matches!(self, DocumentType::SearchWarrant)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown document type '{0}'")]
pub struct UnknownDocumentType(pub String);

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        DocumentType::ALL
            .into_iter()
            .find(|t| {
                t.name().eq_ignore_ascii_case(needle) || t.api_value().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownDocumentType(s.to_string()))
    }
}

/// Ordered label -> value mapping of fields pulled from a document
///
/// Serialized as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedData {
    entries: Vec<(String, String)>,
}

impl ExtractedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing the value in place if the label already exists
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExtractedData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = ExtractedData::new();
        for (label, value) in iter {
            data.insert(label, value);
        }
        data
    }
}

impl Serialize for ExtractedData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExtractedData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ExtractedDataVisitor;

        impl<'de> Visitor<'de> for ExtractedDataVisitor {
            type Value = ExtractedData;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field labels to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut data = ExtractedData::new();
                while let Some((label, value)) = access.next_entry::<String, String>()? {
                    data.insert(label, value);
                }
                Ok(data)
            }
        }

        deserializer.deserialize_map(ExtractedDataVisitor)
    }
}

/// Compliance score for a set of issues: 100 minus per-severity penalties, floored at 0
///
/// Never increases when an issue is added or an issue's severity is raised.
pub fn score_issues(issues: &[Issue]) -> u8 {
    let penalty: u32 = issues.iter().map(|i| i.severity.penalty()).sum();
    // bounded by 100 after saturating_sub
    100u32.saturating_sub(penalty) as u8
}

/// Output of one compliance analysis run
///
/// `compliant` and `score` are derived from the issues at construction and
/// the value is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AnalysisResultWire")]
pub struct AnalysisResult {
    compliant: bool,
    score: u8,
    document_type: DocumentType,
    issues: Vec<Issue>,
    suggestions: Vec<String>,
    extracted_data: ExtractedData,
}

impl AnalysisResult {
    pub fn new(
        document_type: DocumentType,
        issues: Vec<Issue>,
        suggestions: Vec<String>,
        extracted_data: ExtractedData,
    ) -> Self {
        let compliant = !issues.iter().any(|i| i.severity.blocks_filing());
        let score = score_issues(&issues);
        Self {
            compliant,
            score,
            document_type,
            issues,
            suggestions,
            extracted_data,
        }
    }

    pub fn compliant(&self) -> bool {
        self.compliant
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn extracted_data(&self) -> &ExtractedData {
        &self.extracted_data
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Summary line shown under the score
    pub fn status_line(&self) -> String {
        if self.compliant {
            "Document meets AOC compliance standards".to_string()
        } else {
            format!(
                "{} issues must be resolved before filing",
                self.count(Severity::Error)
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Inconsistent analysis result: {0}")]
pub struct InvalidAnalysisResult(String);

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisResultWire {
    compliant: bool,
    score: u8,
    document_type: DocumentType,
    #[serde(default)]
    issues: Vec<Issue>,
    #[serde(default)]
    suggestions: Vec<String>,
    #[serde(default)]
    extracted_data: ExtractedData,
}

impl TryFrom<AnalysisResultWire> for AnalysisResult {
    type Error = InvalidAnalysisResult;

    fn try_from(wire: AnalysisResultWire) -> Result<Self, Self::Error> {
        let result = AnalysisResult::new(
            wire.document_type,
            wire.issues,
            wire.suggestions,
            wire.extracted_data,
        );
        if result.compliant != wire.compliant {
            return Err(InvalidAnalysisResult(format!(
                "compliant={} but the issues imply compliant={}",
                wire.compliant, result.compliant
            )));
        }
        if result.score != wire.score {
            return Err(InvalidAnalysisResult(format!(
                "score={} but the issues imply score={}",
                wire.score, result.score
            )));
        }
        Ok(result)
    }
}

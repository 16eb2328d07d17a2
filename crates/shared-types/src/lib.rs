pub mod records;
pub mod types;

pub use records::{Document, DocumentStatus, FilingType, Template, TemplateKind};
pub use types::{
    score_issues, AnalysisResult, DocumentType, ExtractedData, InvalidAnalysisResult, Issue,
    Severity, UnknownDocumentType,
};

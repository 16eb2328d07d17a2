pub mod dashboard;
pub mod documents;
pub mod draft;
pub mod format;
pub mod templates;

pub use dashboard::{
    compliance_rate, quick_actions, ComplianceMetric, DashboardSummary, QuickAction, StatCard,
    COMPLIANCE_OVERVIEW, RECENT_DOCUMENTS,
};
pub use documents::{sample_documents, CatalogError, DocumentFilter, DocumentStats};
pub use draft::{
    document_type_for, generate_draft, offense_choices, DraftError, GeneratedDraft, OffenseChoice,
    TemplateDraftInput,
};
pub use format::format_created_at;
pub use templates::{filter_templates, find_template, sample_templates};

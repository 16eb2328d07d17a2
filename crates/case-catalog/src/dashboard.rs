//! Dashboard summary: stat cards, recent filings and the compliance overview

use serde::Serialize;
use shared_types::Document;

use crate::documents::DocumentStats;

/// Filings listed under "Recent Documents"
pub const RECENT_DOCUMENTS: usize = 4;

/// Share of checked documents passing each rule family, in percent
pub const COMPLIANCE_OVERVIEW: [ComplianceMetric; 4] = [
    ComplianceMetric { label: "Required Fields", value: 98 },
    ComplianceMetric { label: "Proper Citations", value: 95 },
    ComplianceMetric { label: "Signature Blocks", value: 100 },
    ComplianceMetric { label: "Date Formats", value: 92 },
];

/// Below this a metric is flagged for attention
pub const METRIC_ATTENTION_BELOW: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceMetric {
    pub label: &'static str,
    pub value: u8,
}

impl ComplianceMetric {
    pub fn needs_attention(&self) -> bool {
        self.value < METRIC_ATTENTION_BELOW
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub name: &'static str,
    pub value: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAction {
    pub label: &'static str,
    pub description: &'static str,
    pub href: &'static str,
}

pub fn quick_actions() -> Vec<QuickAction> {
    vec![
        QuickAction {
            label: "Analyze Document",
            description: "Upload & check compliance",
            href: "/analyze",
        },
        QuickAction {
            label: "New Warrant",
            description: "Generate from template",
            href: "/templates?type=warrant",
        },
        QuickAction {
            label: "New Affidavit",
            description: "Affidavit of complaint",
            href: "/templates?type=affidavit",
        },
        QuickAction {
            label: "Criminal Summons",
            description: "Notice to appear",
            href: "/templates?type=summons",
        },
    ]
}

/// Percent of filings that passed review (compliant or already filed),
/// rounded half up; zero for an empty listing
pub fn compliance_rate(stats: &DocumentStats) -> u8 {
    if stats.total == 0 {
        return 0;
    }
    let passed = stats.compliant + stats.filed;
    let percent = (passed * 100 + stats.total / 2) / stats.total;
    percent.min(100) as u8
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub stats: DocumentStats,
    pub compliance_rate: u8,
    pub cards: Vec<StatCard>,
    /// Newest first
    pub recent_documents: Vec<Document>,
    pub compliance_overview: Vec<ComplianceMetric>,
    pub quick_actions: Vec<QuickAction>,
}

impl DashboardSummary {
    pub fn from_documents(docs: &[Document]) -> Self {
        let stats = DocumentStats::from_documents(docs);
        let rate = compliance_rate(&stats);

        let mut recent: Vec<Document> = docs.to_vec();
        // Stable sort keeps listing order for equal timestamps
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(RECENT_DOCUMENTS);

        let cards = vec![
            StatCard {
                name: "Documents",
                value: stats.total.to_string(),
                detail: format!("{} filed", stats.filed),
            },
            StatCard {
                name: "Compliance Rate",
                value: format!("{}%", rate),
                detail: format!("{} of {} passed review", stats.compliant + stats.filed, stats.total),
            },
            StatCard {
                name: "Pending Review",
                value: stats.pending_review.to_string(),
                detail: "Awaiting supervisor review".to_string(),
            },
            StatCard {
                name: "Issues Caught",
                value: stats.issues_found.to_string(),
                detail: "Before filing".to_string(),
            },
        ];

        Self {
            stats,
            compliance_rate: rate,
            cards,
            recent_documents: recent,
            compliance_overview: COMPLIANCE_OVERVIEW.to_vec(),
            quick_actions: quick_actions(),
        }
    }
}

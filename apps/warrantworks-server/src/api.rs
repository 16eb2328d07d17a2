//! API handlers for the WarrantWorks server
//!
//! Provides REST endpoints for:
//! - Document analysis and compliance reports
//! - The processed filings listing and dashboard summary
//! - Template listing and draft generation

use analysis_service::analyze_with_timeout;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::header,
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use case_catalog::{
    filter_templates, find_template, format_created_at, generate_draft, offense_choices,
    sample_documents, ComplianceMetric, DashboardSummary, DocumentFilter, DocumentStats,
    GeneratedDraft, OffenseChoice, QuickAction, StatCard, TemplateDraftInput,
};
use chrono::NaiveDateTime;
use compliance_engine::{render_report, ComplianceEngine};
use document_intake::Upload;
use serde::{Deserialize, Serialize};
use shared_types::{AnalysisResult, Document, DocumentType, Template, TemplateKind};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub analyzer: &'static str,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "warrantworks-server",
        version: env!("CARGO_PKG_VERSION"),
        analyzer: state.analyzer.name(),
    })
}

/// Supported document types response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTypesResponse {
    pub success: bool,
    pub document_types: Vec<DocumentTypeInfo>,
    pub count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTypeInfo {
    pub api_value: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Handler: GET /api/document-types
pub async fn handle_list_document_types() -> Json<DocumentTypesResponse> {
    let document_types: Vec<DocumentTypeInfo> = DocumentType::ALL
        .iter()
        .map(|t| DocumentTypeInfo {
            api_value: t.api_value(),
            name: t.name(),
            description: t.description(),
        })
        .collect();
    let count = document_types.len();

    Json(DocumentTypesResponse {
        success: true,
        document_types,
        count,
    })
}

/// Upload request body
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub filename: String,
    /// File bytes, base64 encoded; a `data:` URL prefix is accepted
    pub content_base64: String,
}

/// Analysis response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis_id: Uuid,
    pub filename: String,
    /// SHA-256 of the uploaded bytes
    pub document_hash: String,
    pub result: AnalysisResult,
}

fn decode_upload(state: &AppState, req: AnalyzeRequest) -> Result<Upload, ServerError> {
    let encoded = req.content_base64.trim();
    let encoded = encoded
        .split_once(";base64,")
        .map_or(encoded, |(_, data)| data);

    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| ServerError::InvalidRequest(format!("contentBase64 is not valid base64: {}", e)))?;

    Ok(Upload::new(req.filename, bytes, state.max_upload_bytes)?)
}

async fn run_analysis(
    state: &AppState,
    req: AnalyzeRequest,
) -> Result<AnalyzeResponse, ServerError> {
    let upload = decode_upload(state, req)?;
    let filename = upload.filename().to_string();
    let document_hash = upload.document_hash().to_string();
    info!(
        "Analyze request: {} ({}, {})",
        filename,
        upload.format(),
        upload.size_label()
    );

    let result =
        analyze_with_timeout(state.analyzer.as_ref(), upload, state.analysis_timeout).await?;

    Ok(AnalyzeResponse {
        success: true,
        analysis_id: Uuid::new_v4(),
        filename,
        document_hash,
        result,
    })
}

/// Handler: POST /api/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ServerError> {
    let Json(req) = payload?;
    let response = run_analysis(&state, req).await?;
    info!(
        "Analysis {} complete: {} scored {}",
        response.analysis_id,
        response.result.document_type(),
        response.result.score()
    );
    Ok(Json(response))
}

/// Handler: POST /api/analyze/report
pub async fn handle_analyze_report(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
    let Json(req) = payload?;
    let response = run_analysis(&state, req).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_report(&response.result),
    ))
}

/// Documents listing query: `?q=&status=&type=`
#[derive(Deserialize, Default)]
pub struct DocumentsQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub filing_type: Option<String>,
}

/// Listing row with its display date
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRow {
    #[serde(flatten)]
    pub document: Document,
    pub created_label: String,
}

#[derive(Serialize)]
pub struct DocumentsResponse {
    pub success: bool,
    pub documents: Vec<DocumentRow>,
    pub shown: usize,
    pub total: usize,
}

impl DocumentRow {
    fn new(document: Document, now: NaiveDateTime) -> Self {
        Self {
            created_label: format_created_at(document.created_at, now),
            document,
        }
    }
}

/// Empty query values mean "no filter"
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_filter(query: DocumentsQuery) -> Result<DocumentFilter, ServerError> {
    let mut filter = DocumentFilter::new().search(query.q.unwrap_or_default());

    if let Some(status) = non_empty(query.status) {
        filter = filter.status(status.parse().map_err(ServerError::InvalidRequest)?);
    }
    if let Some(filing_type) = non_empty(query.filing_type) {
        filter = filter.filing_type(filing_type.parse().map_err(ServerError::InvalidRequest)?);
    }
    Ok(filter)
}

/// Handler: GET /api/documents
pub async fn handle_list_documents(
    State(state): State<AppState>,
    query: Result<Query<DocumentsQuery>, QueryRejection>,
) -> Result<Json<DocumentsResponse>, ServerError> {
    let Query(query) = query?;
    let filter = parse_filter(query)?;
    debug!("Documents filter: {:?}", filter);

    let docs = sample_documents()?;
    let now = state.now();
    let documents: Vec<DocumentRow> = filter
        .apply(&docs)
        .into_iter()
        .map(|doc| DocumentRow::new(doc.clone(), now))
        .collect();

    Ok(Json(DocumentsResponse {
        success: true,
        shown: documents.len(),
        total: docs.len(),
        documents,
    }))
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub stats: DocumentStats,
}

/// Handler: GET /api/documents/stats
pub async fn handle_document_stats() -> Result<Json<StatsResponse>, ServerError> {
    let docs = sample_documents()?;
    Ok(Json(StatsResponse {
        success: true,
        stats: DocumentStats::from(docs.as_slice()),
    }))
}

/// Dashboard response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub success: bool,
    pub stats: DocumentStats,
    pub compliance_rate: u8,
    pub cards: Vec<StatCard>,
    pub recent_documents: Vec<DocumentRow>,
    pub compliance_overview: Vec<ComplianceMetric>,
    pub quick_actions: Vec<QuickAction>,
}

/// Handler: GET /api/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ServerError> {
    let docs = sample_documents()?;
    let summary = DashboardSummary::from_documents(&docs);
    let now = state.now();

    Ok(Json(DashboardResponse {
        success: true,
        stats: summary.stats,
        compliance_rate: summary.compliance_rate,
        cards: summary.cards,
        recent_documents: summary
            .recent_documents
            .into_iter()
            .map(|doc| DocumentRow::new(doc, now))
            .collect(),
        compliance_overview: summary.compliance_overview,
        quick_actions: summary.quick_actions,
    }))
}

#[derive(Deserialize, Default)]
pub struct TemplatesQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Template list response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateListResponse {
    pub success: bool,
    pub templates: Vec<Template>,
    pub count: usize,
    /// Options for the generator's offense field
    pub offense_choices: Vec<OffenseChoice>,
}

/// Handler: GET /api/templates
pub async fn handle_list_templates(
    query: Result<Query<TemplatesQuery>, QueryRejection>,
) -> Result<Json<TemplateListResponse>, ServerError> {
    let Query(query) = query?;
    let kind = non_empty(query.kind)
        .map(|k| k.parse::<TemplateKind>())
        .transpose()
        .map_err(ServerError::InvalidRequest)?;

    let templates = filter_templates(kind);
    let count = templates.len();

    Ok(Json(TemplateListResponse {
        success: true,
        templates,
        count,
        offense_choices: offense_choices(),
    }))
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub draft: GeneratedDraft,
    pub analysis: AnalysisResult,
}

/// Handler: POST /api/templates/:id/generate
pub async fn handle_generate_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TemplateDraftInput>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ServerError> {
    let Json(input) = payload?;
    let template =
        find_template(&id).ok_or_else(|| ServerError::NotFound(format!("Template '{}'", id)))?;
    info!("Generate request: template {} ({})", template.id, template.name);

    let today = state.today();
    let draft = generate_draft(&template, &input, today)?;
    let analysis = ComplianceEngine::new().analyze_as(&draft.text, draft.document_type, today);

    Ok(Json(GenerateResponse {
        success: true,
        draft,
        analysis,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_document_types() {
        let response = handle_list_document_types().await;
        assert!(response.success);
        assert_eq!(response.count, 4);
        assert!(response
            .document_types
            .iter()
            .any(|t| t.name == "Affidavit of Complaint"));
    }

    #[test]
    fn test_empty_filters_are_ignored() {
        let filter = parse_filter(DocumentsQuery {
            q: None,
            status: Some(String::new()),
            filing_type: Some(" ".to_string()),
        })
        .unwrap();
        assert_eq!(filter, DocumentFilter::new());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = parse_filter(DocumentsQuery {
            status: Some("Archived".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ServerError::InvalidRequest(_)));
    }
}

//! WarrantWorks TN Server
//!
//! Checks Tennessee criminal process documents (arrest warrants, affidavits
//! of complaint, criminal summons, search warrants) before filing. Provides
//! REST API endpoints for:
//!
//! - Document analysis and downloadable compliance reports
//! - The processed filings listing and dashboard summary
//! - Template listing and draft generation
//!
//! Uploads arrive as base64 JSON bodies; text extraction and rule checks run
//! on the blocking pool behind a per-request timeout.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use analysis_service::ComplianceAnalyzer;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod config;
mod error;

use api::{
    handle_analyze, handle_analyze_report, handle_dashboard, handle_document_stats,
    handle_generate_draft, handle_health, handle_list_document_types, handle_list_documents,
    handle_list_templates,
};
use config::Args;
use error::rate_limit_response;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn ComplianceAnalyzer>,
    pub analysis_timeout: Duration,
    pub max_upload_bytes: usize,
    /// Fixed clock for listing labels and draft dates; local time when unset
    pub clock: Option<NaiveDateTime>,
}

impl AppState {
    pub fn now(&self) -> NaiveDateTime {
        self.clock
            .unwrap_or_else(|| chrono::Local::now().naive_local())
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// JSON body limit that fits a base64 upload of `max_upload_bytes`
pub fn body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_add(64 * 1024)
}

/// Routes and middleware shared by the server and the tests
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // Analysis
        .route("/api/document-types", get(handle_list_document_types))
        .route("/api/analyze", post(handle_analyze))
        .route("/api/analyze/report", post(handle_analyze_report))
        // Filings
        .route("/api/documents", get(handle_list_documents))
        .route("/api/documents/stats", get(handle_document_stats))
        .route("/api/dashboard", get(handle_dashboard))
        // Templates
        .route("/api/templates", get(handle_list_templates))
        .route("/api/templates/:id/generate", post(handle_generate_draft))
        .layer(DefaultBodyLimit::max(body_limit(state.max_upload_bytes)))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting WarrantWorks server on {}:{}", args.host, args.port);

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit.saturating_mul(2))
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Rate limit must be at least 1 request/second"))?,
    );

    let state = args.app_state();
    let analyzer = state.analyzer.name();

    let app = router(state)
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(middleware::map_response(rate_limit_response));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Analyzer: {}, OCR: {:?}", analyzer, args.ocr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Analysis timeout: {}ms", args.analysis_timeout_ms);

    // The rate limiter keys on the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

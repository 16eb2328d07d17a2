use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use compliance_engine::ComplianceEngine;
use document_intake::{TextExtractor, Upload};
use shared_types::AnalysisResult;
use tracing::{info, warn};

use crate::error::AnalysisError;

/// Analyzes one uploaded document
#[async_trait]
pub trait ComplianceAnalyzer: Send + Sync {
    /// Backend name for logs and health output
    fn name(&self) -> &'static str;

    async fn analyze(&self, upload: Upload) -> Result<AnalysisResult, AnalysisError>;
}

/// Text extraction plus the rules engine, run on the blocking pool
#[derive(Clone, Default)]
pub struct EngineAnalyzer {
    extractor: TextExtractor,
    /// Fixed reference date; the local date is used when unset
    today: Option<NaiveDate>,
}

impl EngineAnalyzer {
    pub fn new(extractor: TextExtractor) -> Self {
        Self {
            extractor,
            today: None,
        }
    }

    /// Evaluate date rules against a fixed day
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[async_trait]
impl ComplianceAnalyzer for EngineAnalyzer {
    fn name(&self) -> &'static str {
        "engine"
    }

    async fn analyze(&self, upload: Upload) -> Result<AnalysisResult, AnalysisError> {
        let extractor = self.extractor.clone();
        let today = self.today();

        tokio::task::spawn_blocking(move || -> Result<AnalysisResult, AnalysisError> {
            let extracted = extractor.extract(&upload)?;
            let result = ComplianceEngine::new().analyze_text(&extracted.text, today)?;
            info!(
                "{} ({}) analyzed as {} with score {}",
                upload.filename(),
                upload.document_hash(),
                result.document_type(),
                result.score()
            );
            Ok(result)
        })
        .await
        .map_err(|e| AnalysisError::Internal(format!("analysis task failed: {}", e)))?
    }
}

/// Run an analysis, failing with `Timeout` if it takes longer than `limit`
pub async fn analyze_with_timeout(
    analyzer: &dyn ComplianceAnalyzer,
    upload: Upload,
    limit: Duration,
) -> Result<AnalysisResult, AnalysisError> {
    match tokio::time::timeout(limit, analyzer.analyze(upload)).await {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!("{} analysis exceeded {:?}", analyzer.name(), limit);
            Err(AnalysisError::Timeout(limit))
        }
    }
}

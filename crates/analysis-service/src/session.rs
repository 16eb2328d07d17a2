//! Analysis state of one page: the selected file, whether an analysis is in
//! flight, and its outcome.
//!
//! Each `begin` hands out a ticket tied to the current selection. Selecting
//! another file or pressing "Analyze Another" invalidates outstanding
//! tickets, so a late result can never be shown against the wrong file.

use document_intake::Upload;
use shared_types::AnalysisResult;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::analyzer::ComplianceAnalyzer;
use crate::error::{AnalysisError, SessionError};

/// Proof that an analysis was started for a particular selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket {
    generation: u64,
}

#[derive(Debug, Default)]
pub struct AnalysisSession {
    file: Option<Upload>,
    analyzing: bool,
    result: Option<AnalysisResult>,
    error: Option<AnalysisError>,
    generation: u64,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&Upload> {
        self.file.as_ref()
    }

    pub fn analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        self.error.as_ref()
    }

    /// The analyze action is enabled only with a file and nothing in flight
    pub fn can_analyze(&self) -> bool {
        self.file.is_some() && !self.analyzing
    }

    /// Replace the selected file, discarding any result and in-flight analysis
    pub fn select_file(&mut self, upload: Upload) {
        debug!("Selected {} ({})", upload.filename(), upload.size_label());
        self.file = Some(upload);
        self.reset_outcome();
    }

    /// Start analyzing the selected file
    pub fn begin(&mut self) -> Result<(AnalysisTicket, Upload), SessionError> {
        if self.analyzing {
            return Err(SessionError::AnalysisInProgress);
        }
        let upload = self.file.clone().ok_or(SessionError::NoFileSelected)?;

        self.analyzing = true;
        self.result = None;
        self.error = None;
        Ok((
            AnalysisTicket {
                generation: self.generation,
            },
            upload,
        ))
    }

    /// Record the outcome of the analysis started with `ticket`
    ///
    /// A stale ticket leaves the session untouched.
    pub fn finish(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Result<(), SessionError> {
        if ticket.generation != self.generation {
            debug!("Discarding stale analysis outcome");
            return Err(SessionError::Stale);
        }

        self.analyzing = false;
        match outcome {
            Ok(result) => {
                info!(
                    "Analysis complete: {} scored {}",
                    result.document_type(),
                    result.score()
                );
                self.result = Some(result);
            }
            Err(err) => {
                info!("Analysis failed: {}", err);
                self.error = Some(err);
            }
        }
        Ok(())
    }

    /// Begin, analyze and finish while holding the session exclusively
    pub async fn run(&mut self, analyzer: &dyn ComplianceAnalyzer) -> Result<(), SessionError> {
        let (ticket, upload) = self.begin()?;
        let outcome = analyzer.analyze(upload).await;
        self.finish(ticket, outcome)
    }

    /// Return to the empty upload state
    pub fn analyze_another(&mut self) {
        self.file = None;
        self.reset_outcome();
    }

    fn reset_outcome(&mut self) {
        self.generation += 1;
        self.analyzing = false;
        self.result = None;
        self.error = None;
    }
}

/// Run an analysis on a shared session without holding the lock across the
/// analyzer call, so the in-flight state is observable and the file can be
/// replaced while it runs
pub async fn run_shared(
    session: &Mutex<AnalysisSession>,
    analyzer: &dyn ComplianceAnalyzer,
) -> Result<(), SessionError> {
    let (ticket, upload) = session.lock().await.begin()?;
    let outcome = analyzer.analyze(upload).await;
    session.lock().await.finish(ticket, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::fixture::{sample_analysis, FixtureAnalyzer};
    use document_intake::DEFAULT_MAX_UPLOAD_BYTES;
    use pretty_assertions::assert_eq;

    fn upload(name: &str) -> Upload {
        Upload::new(name, b"%PDF-1.5\n%session".to_vec(), DEFAULT_MAX_UPLOAD_BYTES).unwrap()
    }

    #[test]
    fn test_begin_requires_file() {
        let mut session = AnalysisSession::new();
        assert!(!session.can_analyze());
        assert_eq!(session.begin().unwrap_err(), SessionError::NoFileSelected);
        assert!(!session.analyzing());
    }

    #[test]
    fn test_analyzing_flag_spans_begin_to_finish() {
        let mut session = AnalysisSession::new();
        session.select_file(upload("warrant.pdf"));

        let (ticket, _) = session.begin().unwrap();
        assert!(session.analyzing());
        assert!(!session.can_analyze());
        assert_eq!(session.begin().unwrap_err(), SessionError::AnalysisInProgress);

        session.finish(ticket, Ok(sample_analysis())).unwrap();
        assert!(!session.analyzing());
        assert_eq!(session.result().map(|r| r.score()), Some(78));
    }

    #[test]
    fn test_failure_clears_flag_and_keeps_error() {
        let mut session = AnalysisSession::new();
        session.select_file(upload("warrant.pdf"));
        let (ticket, _) = session.begin().unwrap();

        session
            .finish(ticket, Err(AnalysisError::UnrecognizedDocumentType))
            .unwrap();
        assert!(!session.analyzing());
        assert!(session.result().is_none());
        assert!(matches!(
            session.error(),
            Some(AnalysisError::UnrecognizedDocumentType)
        ));
    }

    #[test]
    fn test_selecting_new_file_discards_late_result() {
        let mut session = AnalysisSession::new();
        session.select_file(upload("first.pdf"));
        let (ticket, _) = session.begin().unwrap();

        session.select_file(upload("second.pdf"));
        assert!(!session.analyzing());
        assert_eq!(
            session.finish(ticket, Ok(sample_analysis())).unwrap_err(),
            SessionError::Stale
        );
        assert!(session.result().is_none());
        assert_eq!(session.file().map(|f| f.filename()), Some("second.pdf"));
    }

    #[test]
    fn test_analyze_another_resets_everything() {
        let mut session = AnalysisSession::new();
        session.select_file(upload("warrant.pdf"));
        let (ticket, _) = session.begin().unwrap();
        session.finish(ticket, Ok(sample_analysis())).unwrap();

        session.analyze_another();
        assert!(session.file().is_none());
        assert!(session.result().is_none());
        assert!(session.error().is_none());
        assert!(!session.analyzing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stores_result() {
        let mut session = AnalysisSession::new();
        session.select_file(upload("warrant.pdf"));
        session.run(&FixtureAnalyzer::default()).await.unwrap();
        assert_eq!(session.result(), Some(&sample_analysis()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shared_session_reports_in_flight_state() {
        let session = Arc::new(Mutex::new(AnalysisSession::new()));
        session.lock().await.select_file(upload("warrant.pdf"));

        let task = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { run_shared(&session, &FixtureAnalyzer::default()).await })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        {
            let state = session.lock().await;
            assert!(state.analyzing());
            assert!(state.result().is_none());
        }

        task.await.unwrap().unwrap();
        let state = session.lock().await;
        assert!(!state.analyzing());
        assert_eq!(state.result().map(|r| r.score()), Some(78));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shared_session_analyze_another_wins_over_late_result() {
        let session = Arc::new(Mutex::new(AnalysisSession::new()));
        session.lock().await.select_file(upload("warrant.pdf"));

        let task = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { run_shared(&session, &FixtureAnalyzer::default()).await })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        session.lock().await.analyze_another();

        assert_eq!(task.await.unwrap().unwrap_err(), SessionError::Stale);
        assert!(session.lock().await.result().is_none());
    }
}

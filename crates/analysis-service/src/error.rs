use std::time::Duration;

use document_intake::{ExtractionError, IntakeError};
use thiserror::Error;

/// Why an analysis produced no result
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Document type not recognized; expected a Tennessee arrest warrant, affidavit of complaint, criminal summons or search warrant")]
    UnrecognizedDocumentType,

    #[error("Analysis did not finish within {0:?}")]
    Timeout(Duration),

    #[error("Analysis failed: {0}")]
    Internal(String),
}

impl From<compliance_engine::EngineError> for AnalysisError {
    fn from(err: compliance_engine::EngineError) -> Self {
        match err {
            compliance_engine::EngineError::UnrecognizedDocumentType => {
                AnalysisError::UnrecognizedDocumentType
            }
        }
    }
}

/// Session state transitions that are not allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("An analysis is already in progress")]
    AnalysisInProgress,

    #[error("Analysis result is for a file that is no longer selected")]
    Stale,
}

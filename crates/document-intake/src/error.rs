//! Error types for document intake

use thiserror::Error;

use crate::format::DocumentFormat;

/// Upload validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Unsupported file type: {0}. Supported: PDF, DOC, DOCX, PNG, JPG")]
    UnsupportedFormat(String),

    #[error("File is {size} bytes; the limit is {limit} bytes")]
    FileTooLarge { size: usize, limit: usize },

    #[error("File is empty")]
    EmptyFile,

    #[error("File content does not match its {expected} extension (detected {detected})")]
    ContentMismatch {
        expected: DocumentFormat,
        detected: String,
    },
}

/// Text extraction failures
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Document is unreadable: {0}")]
    Unreadable(String),

    #[error("Password-protected document")]
    PasswordProtected,

    #[error("No text could be extracted: {0}")]
    NoText(String),

    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),
}

/// OCR backend failures
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("OCR backend not available: {0}")]
    Unavailable(String),

    #[error("OCR failed: {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

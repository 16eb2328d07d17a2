//! Document intake for compliance analysis
//!
//! Validates uploaded court documents (type, size, content) and extracts
//! their plain text:
//!
//! - PDF text layers via `pdf-extract`, with `lopdf` for structure checks
//! - DOCX bodies read from the zip archive
//! - Legacy DOC files by printable-run recovery
//! - PNG/JPEG scans through a pluggable OCR backend

pub mod error;
pub mod extract;
pub mod format;
pub mod ocr;
pub mod upload;

pub use error::{ExtractionError, IntakeError, OcrError};
pub use extract::{ExtractedText, ExtractionMethod, TextExtractor, MIN_TEXT_CHARS};
pub use format::{DocumentFormat, ACCEPTED_EXTENSIONS};
pub use ocr::{DisabledOcr, OcrBackend, TesseractOcr};
pub use upload::{Upload, DEFAULT_MAX_UPLOAD_BYTES};

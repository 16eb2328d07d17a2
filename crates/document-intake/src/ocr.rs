//! OCR backends for image uploads
//!
//! The analyzer has no bundled OCR model. Images are passed to an
//! `OcrBackend`; the default backend reports OCR as unavailable, and
//! `TesseractOcr` shells out to a locally installed `tesseract` binary.

use std::io::Write;
use std::process::Command;

use tracing::debug;

use crate::error::OcrError;
use crate::format::DocumentFormat;

/// Recognizes text in raster documents
pub trait OcrBackend: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Whether this backend can read the given format
    fn supports(&self, format: DocumentFormat) -> bool;

    fn recognize(&self, bytes: &[u8], format: DocumentFormat) -> Result<String, OcrError>;
}

/// Backend used when OCR is not configured
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledOcr;

impl OcrBackend for DisabledOcr {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn supports(&self, _format: DocumentFormat) -> bool {
        false
    }

    fn recognize(&self, _bytes: &[u8], format: DocumentFormat) -> Result<String, OcrError> {
        Err(OcrError::Unavailable(format!(
            "OCR is not configured; cannot read {} documents",
            format
        )))
    }
}

/// Tesseract OCR via its command-line interface
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    language: String,
    binary: String,
}

impl TesseractOcr {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            binary: "tesseract".to_string(),
        }
    }

    /// Use a specific tesseract executable
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new("eng")
    }
}

impl OcrBackend for TesseractOcr {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn supports(&self, format: DocumentFormat) -> bool {
        format.is_image()
    }

    fn recognize(&self, bytes: &[u8], format: DocumentFormat) -> Result<String, OcrError> {
        if !self.supports(format) {
            return Err(OcrError::Unavailable(format!(
                "tesseract cannot read {} documents",
                format
            )));
        }

        // tesseract picks its decoder from the file extension
        let mut staged = tempfile::Builder::new()
            .prefix("warrantworks-ocr-")
            .suffix(&format!(".{}", format.extension()))
            .tempfile()?;
        staged.write_all(bytes)?;
        staged.flush()?;

        debug!("Running {} on {}", self.binary, staged.path().display());

        let output = Command::new(&self.binary)
            .arg(staged.path())
            .arg("stdout")
            .args(["-l", &self.language])
            .output();

        match output {
            Ok(output) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(OcrError::Failed(format!("tesseract failed: {}", stderr.trim())))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(OcrError::Unavailable(
                format!("{} not found (install tesseract-ocr)", self.binary),
            )),
            Err(e) => Err(OcrError::Io(e)),
        }
    }
}

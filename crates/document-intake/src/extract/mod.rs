//! Plain-text extraction for every accepted upload format

mod doc;
mod docx;
mod pdf;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ExtractionError, OcrError};
use crate::format::DocumentFormat;
use crate::ocr::{DisabledOcr, OcrBackend};
use crate::upload::Upload;

/// Below this many non-whitespace characters a document is treated as having no text
pub const MIN_TEXT_CHARS: usize = 50;

/// How the text was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    PdfText,
    Docx,
    LegacyDoc,
    Ocr,
}

#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    /// Known for PDFs and images
    pub page_count: Option<u32>,
    pub method: ExtractionMethod,
}

/// Extracts text from validated uploads
#[derive(Clone)]
pub struct TextExtractor {
    ocr: Arc<dyn OcrBackend>,
}

impl TextExtractor {
    pub fn new(ocr: Arc<dyn OcrBackend>) -> Self {
        Self { ocr }
    }

    pub fn without_ocr() -> Self {
        Self::new(Arc::new(DisabledOcr))
    }

    pub fn ocr_backend(&self) -> &'static str {
        self.ocr.name()
    }

    pub fn extract(&self, upload: &Upload) -> Result<ExtractedText, ExtractionError> {
        let bytes = upload.bytes();
        let format = upload.format();

        let (text, page_count, method) = match format {
            DocumentFormat::Pdf => {
                let (text, pages) = pdf::extract_pdf(bytes)?;
                if has_enough_text(&text) {
                    (text, Some(pages), ExtractionMethod::PdfText)
                } else if self.ocr.supports(format) {
                    debug!("PDF has no text layer, falling back to {}", self.ocr.name());
                    (self.recognize(bytes, format)?, Some(pages), ExtractionMethod::Ocr)
                } else {
                    return Err(ExtractionError::NoText(
                        "PDF has no text layer (scanned document); OCR is required".to_string(),
                    ));
                }
            }
            DocumentFormat::Docx => (docx::extract_docx(bytes)?, None, ExtractionMethod::Docx),
            DocumentFormat::Doc => (
                doc::extract_legacy_doc(bytes),
                None,
                ExtractionMethod::LegacyDoc,
            ),
            DocumentFormat::Png | DocumentFormat::Jpeg => {
                (self.recognize(bytes, format)?, Some(1), ExtractionMethod::Ocr)
            }
        };

        if !has_enough_text(&text) {
            return Err(ExtractionError::NoText(format!(
                "only {} readable characters found in {}",
                text_chars(&text),
                upload.filename()
            )));
        }

        info!(
            "Extracted {} characters from {} via {:?}",
            text.len(),
            upload.filename(),
            method
        );

        Ok(ExtractedText {
            text: normalize_line_breaks(&text),
            page_count,
            method,
        })
    }

    fn recognize(&self, bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractionError> {
        match self.ocr.recognize(bytes, format) {
            Ok(text) => Ok(text),
            Err(OcrError::Unavailable(reason)) => Err(ExtractionError::NoText(reason)),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::without_ocr()
    }
}

fn text_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

fn has_enough_text(text: &str) -> bool {
    text_chars(text) >= MIN_TEXT_CHARS
}

/// CRLF, CR and form feeds become plain newlines
fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace(['\r', '\x0C'], "\n")
}

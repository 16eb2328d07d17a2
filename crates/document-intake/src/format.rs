//! Accepted upload formats and content sniffing

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::IntakeError;

/// Extensions accepted by the upload form, in display order
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "png", "jpg", "jpeg"];

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// OLE compound file header used by legacy .doc files
const CFB_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Doc,
    Docx,
    Png,
    Jpeg,
}

impl DocumentFormat {
    /// Determine the format from a file name's extension (case-insensitive)
    pub fn from_filename(filename: &str) -> Result<Self, IntakeError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| IntakeError::UnsupportedFormat(filename.to_string()))?;

        match extension.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "doc" => Ok(DocumentFormat::Doc),
            "docx" => Ok(DocumentFormat::Docx),
            "png" => Ok(DocumentFormat::Png),
            "jpg" | "jpeg" => Ok(DocumentFormat::Jpeg),
            _ => Err(IntakeError::UnsupportedFormat(format!(".{}", extension))),
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Doc => "application/msword",
            DocumentFormat::Docx => DOCX_MIME,
            DocumentFormat::Png => "image/png",
            DocumentFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Doc => "doc",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Png => "png",
            DocumentFormat::Jpeg => "jpg",
        }
    }

    pub fn is_image(self) -> bool {
        matches!(self, DocumentFormat::Png | DocumentFormat::Jpeg)
    }

    /// Check that the file's magic bytes agree with this format
    ///
    /// DOCX files may sniff as a plain zip archive and DOC files as a bare
    /// OLE container; both are accepted here and verified during extraction.
    pub fn verify_content(self, bytes: &[u8]) -> Result<(), IntakeError> {
        let detected = infer::get(bytes).map(|kind| kind.mime_type());

        let matches = match self {
            DocumentFormat::Pdf | DocumentFormat::Png | DocumentFormat::Jpeg => {
                detected == Some(self.mime_type())
            }
            DocumentFormat::Docx => matches!(detected, Some(DOCX_MIME) | Some("application/zip")),
            DocumentFormat::Doc => {
                detected == Some("application/msword")
                    || detected == Some("application/x-ole-storage")
                    || bytes.starts_with(&CFB_MAGIC)
            }
        };

        if matches {
            Ok(())
        } else {
            Err(IntakeError::ContentMismatch {
                expected: self,
                detected: detected.unwrap_or("unknown content").to_string(),
            })
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Doc => "DOC",
            DocumentFormat::Docx => "DOCX",
            DocumentFormat::Png => "PNG",
            DocumentFormat::Jpeg => "JPEG",
        };
        f.write_str(label)
    }
}

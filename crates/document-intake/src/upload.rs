//! Validated document uploads

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::IntakeError;
use crate::format::DocumentFormat;

/// 10 MB, the limit stated on the upload form
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// A document that passed intake validation
#[derive(Debug, Clone)]
pub struct Upload {
    filename: String,
    format: DocumentFormat,
    bytes: Vec<u8>,
    document_hash: String,
}

impl Upload {
    /// Validate an uploaded file
    ///
    /// Checks, in order: non-empty, size within `max_bytes`, supported
    /// extension, and magic bytes consistent with the extension.
    pub fn new(
        filename: impl Into<String>,
        bytes: Vec<u8>,
        max_bytes: usize,
    ) -> Result<Self, IntakeError> {
        let filename = filename.into();

        if bytes.is_empty() {
            return Err(IntakeError::EmptyFile);
        }
        if bytes.len() > max_bytes {
            return Err(IntakeError::FileTooLarge {
                size: bytes.len(),
                limit: max_bytes,
            });
        }

        let format = DocumentFormat::from_filename(&filename)?;
        format.verify_content(&bytes)?;

        let document_hash = hex::encode(Sha256::digest(&bytes));
        debug!(
            "Accepted upload {} ({}, {} bytes, sha256 {})",
            filename,
            format,
            bytes.len(),
            document_hash
        );

        Ok(Self {
            filename,
            format,
            bytes,
            document_hash,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Hex SHA-256 of the file content
    pub fn document_hash(&self) -> &str {
        &self.document_hash
    }

    /// Size in megabytes with two decimals, as shown on the drop zone
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.bytes.len() as f64 / 1024.0 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pdf_bytes(len: usize) -> Vec<u8> {
        let mut bytes = b"%PDF-1.5\n".to_vec();
        bytes.resize(len.max(bytes.len()), b' ');
        bytes
    }

    #[test]
    fn test_accepts_valid_pdf() {
        let upload = Upload::new("warrant.pdf", pdf_bytes(2048), DEFAULT_MAX_UPLOAD_BYTES).unwrap();
        assert_eq!(upload.format(), DocumentFormat::Pdf);
        assert_eq!(upload.size(), 2048);
        assert_eq!(upload.document_hash().len(), 64);
        assert_eq!(upload.size_label(), "0.00 MB");
    }

    #[test]
    fn test_rejects_empty_file() {
        let err = Upload::new("warrant.pdf", Vec::new(), DEFAULT_MAX_UPLOAD_BYTES).unwrap_err();
        assert_eq!(err, IntakeError::EmptyFile);
    }

    #[test]
    fn test_rejects_oversized_file_before_format_checks() {
        let err = Upload::new("warrant.txt", vec![b'x'; 101], 100).unwrap_err();
        assert_eq!(err, IntakeError::FileTooLarge { size: 101, limit: 100 });
    }

    #[test]
    fn test_limit_is_inclusive() {
        assert!(Upload::new("warrant.pdf", pdf_bytes(100), 100).is_ok());
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let err = Upload::new("warrant.txt", pdf_bytes(64), DEFAULT_MAX_UPLOAD_BYTES).unwrap_err();
        assert!(matches!(err, IntakeError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_rejects_renamed_file() {
        let err = Upload::new("warrant.png", pdf_bytes(64), DEFAULT_MAX_UPLOAD_BYTES).unwrap_err();
        assert!(matches!(err, IntakeError::ContentMismatch { .. }));
    }

    #[test]
    fn test_identical_content_hashes_identically() {
        let a = Upload::new("a.pdf", pdf_bytes(300), DEFAULT_MAX_UPLOAD_BYTES).unwrap();
        let b = Upload::new("b.PDF", pdf_bytes(300), DEFAULT_MAX_UPLOAD_BYTES).unwrap();
        assert_eq!(a.document_hash(), b.document_hash());
    }
}

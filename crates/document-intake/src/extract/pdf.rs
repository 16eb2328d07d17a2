//! PDF text layer extraction

use std::panic;

use tracing::debug;

use crate::error::ExtractionError;

/// Extract the text layer and page count of a PDF
pub(crate) fn extract_pdf(bytes: &[u8]) -> Result<(String, u32), ExtractionError> {
    let document = lopdf::Document::load_mem(bytes).map_err(|e| classify_error(&e.to_string()))?;

    if document.is_encrypted() {
        return Err(ExtractionError::PasswordProtected);
    }

    let page_count = document.get_pages().len() as u32;
    debug!("PDF parsed: {} pages", page_count);

    // pdf-extract panics on some malformed font programs
    let text = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| ExtractionError::Unreadable("PDF text layer could not be decoded".to_string()))?
        .map_err(|e| classify_error(&e.to_string()))?;

    Ok((text, page_count))
}

fn classify_error(message: &str) -> ExtractionError {
    let lower = message.to_lowercase();
    if lower.contains("encrypt") || lower.contains("password") {
        ExtractionError::PasswordProtected
    } else {
        ExtractionError::Unreadable(format!("invalid PDF: {}", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_after_header_is_unreadable() {
        let err = extract_pdf(b"%PDF-1.5\nthis is not a pdf body").unwrap_err();
        assert!(matches!(err, ExtractionError::Unreadable(_)));
    }

    #[test]
    fn test_password_messages_map_to_password_protected() {
        assert!(matches!(
            classify_error("file is encrypted"),
            ExtractionError::PasswordProtected
        ));
        assert!(matches!(
            classify_error("unexpected end of file"),
            ExtractionError::Unreadable(_)
        ));
    }
}

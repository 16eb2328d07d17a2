//! DOCX (Office Open XML) text extraction

use std::io::{Cursor, Read};

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use zip::ZipArchive;

use crate::error::ExtractionError;

lazy_static! {
    /// Text runs, tabs and line breaks inside a paragraph
    static ref RUN_PATTERN: Regex =
        Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab/>|<w:br/>").unwrap();

    static ref NUMERIC_ENTITY: Regex = Regex::new(r"&#(x?)([0-9A-Fa-f]+);").unwrap();
}

const DOCUMENT_PART: &str = "word/document.xml";

/// Largest inflated `word/document.xml` accepted
pub const MAX_DOCUMENT_XML_BYTES: u64 = 32 * 1024 * 1024;

pub(crate) fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    extract_docx_within(bytes, MAX_DOCUMENT_XML_BYTES)
}

fn body_too_large(limit: u64) -> ExtractionError {
    ExtractionError::Unreadable(format!(
        "DOCX body inflates to more than {} bytes",
        limit
    ))
}

fn extract_docx_within(bytes: &[u8], limit: u64) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Unreadable(format!("not a valid DOCX archive: {}", e)))?;

    let entry = archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| ExtractionError::Unreadable(format!("DOCX has no {}", DOCUMENT_PART)))?;
    if entry.size() > limit {
        return Err(body_too_large(limit));
    }

    // The declared size is not trusted; the read itself is bounded too
    let mut raw = Vec::new();
    entry
        .take(limit + 1)
        .read_to_end(&mut raw)
        .map_err(|e| ExtractionError::Unreadable(format!("DOCX body is corrupt: {}", e)))?;
    if raw.len() as u64 > limit {
        return Err(body_too_large(limit));
    }

    let xml = String::from_utf8(raw)
        .map_err(|e| ExtractionError::Unreadable(format!("DOCX body is not UTF-8: {}", e)))?;
    Ok(document_xml_to_text(&xml))
}

/// One line per non-empty paragraph
fn document_xml_to_text(xml: &str) -> String {
    let mut lines = Vec::new();

    for paragraph in xml.split("</w:p>") {
        let mut line = String::new();
        for caps in RUN_PATTERN.captures_iter(paragraph) {
            match caps.get(1) {
                Some(text) => line.push_str(&unescape_xml(text.as_str())),
                None if caps[0].starts_with("<w:tab") => line.push('\t'),
                None => line.push('\n'),
            }
        }
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }

    lines.join("\n")
}

fn unescape_xml(text: &str) -> String {
    let named = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");

    let numeric = NUMERIC_ENTITY.replace_all(&named, |caps: &Captures| {
        let radix = if caps[1].is_empty() { 10 } else { 16 };
        u32::from_str_radix(&caps[2], radix)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    // &amp; last so "&amp;lt;" stays "&lt;"
    numeric.replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paragraphs_become_lines() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>ARREST WARRANT</w:t></w:r></w:p>
            <w:p><w:r><w:t xml:space="preserve">Defendant Name: </w:t></w:r><w:r><w:t>John Smith</w:t></w:r></w:p>
            <w:p></w:p>
            <w:p><w:r><w:t>Offense</w:t><w:tab/><w:t>Theft</w:t></w:r></w:p>
        </w:body></w:document>"#;
        assert_eq!(
            document_xml_to_text(xml),
            "ARREST WARRANT\nDefendant Name: John Smith\nOffense\tTheft"
        );
    }

    #[test]
    fn test_table_tags_are_not_text_runs() {
        let xml = "<w:p><w:tbl><w:tc><w:t>Cell</w:t></w:tc></w:tbl></w:p>";
        assert_eq!(document_xml_to_text(xml), "Cell");
    }

    #[test]
    fn test_unescapes_entities() {
        assert_eq!(
            unescape_xml("T.C.A. &#167; 39-14-103 &amp; &lt;more&gt; &#xA7;"),
            "T.C.A. § 39-14-103 & <more> §"
        );
        assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
    }

    fn docx_with_xml(xml: &str) -> Vec<u8> {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_inflated_body_over_limit_is_rejected() {
        // 1 MiB of spaces deflates to a few KiB
        let xml = format!(
            "<w:document><w:body><w:p><w:r><w:t>ARREST WARRANT</w:t></w:r></w:p>{}</w:body></w:document>",
            " ".repeat(1024 * 1024)
        );
        let bytes = docx_with_xml(&xml);
        assert!(bytes.len() < 64 * 1024);

        let err = extract_docx_within(&bytes, 64 * 1024).unwrap_err();
        match err {
            ExtractionError::Unreadable(msg) => assert!(msg.contains("inflates"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_body_within_limit_is_read() {
        let bytes = docx_with_xml("<w:p><w:r><w:t>CRIMINAL SUMMONS</w:t></w:r></w:p>");
        assert_eq!(extract_docx(&bytes).unwrap(), "CRIMINAL SUMMONS");
    }

    #[test]
    fn test_non_zip_is_unreadable() {
        assert!(matches!(
            extract_docx(b"PK\x03\x04 truncated"),
            Err(ExtractionError::Unreadable(_))
        ));
    }
}

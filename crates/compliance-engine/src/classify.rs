//! Document type classification by weighted keyword scoring

use shared_types::DocumentType;
use tracing::debug;

use crate::patterns::{
    AFFIDAVIT_KEYWORDS, AFFIDAVIT_RECITALS, ARREST_WARRANT_KEYWORDS, HEADING_BONUS, HEADING_LINES, HEADING_MAX_LEN,
    SEARCH_WARRANT_KEYWORDS, SUMMONS_KEYWORDS,
};

/// Candidate order; on equal scores the earlier (more specific) type wins
const PRECEDENCE: [DocumentType; 4] = [
    DocumentType::SearchWarrant,
    DocumentType::AffidavitOfComplaint,
    DocumentType::CriminalSummons,
    DocumentType::ArrestWarrant,
];

fn keywords(doc_type: DocumentType) -> &'static [(&'static str, u32)] {
    match doc_type {
        DocumentType::ArrestWarrant => ARREST_WARRANT_KEYWORDS,
        DocumentType::AffidavitOfComplaint => AFFIDAVIT_KEYWORDS,
        DocumentType::CriminalSummons => SUMMONS_KEYWORDS,
        DocumentType::SearchWarrant => SEARCH_WARRANT_KEYWORDS,
    }
}

/// Score each keyword once, plus a bonus when the type names the heading
pub fn score(text_lower: &str, heading_lower: &str, doc_type: DocumentType) -> u32 {
    let keyword_score: u32 = keywords(doc_type)
        .iter()
        .filter(|(phrase, _)| text_lower.contains(phrase))
        .map(|(_, weight)| weight)
        .sum();

    let name = doc_type.name().to_lowercase();
    if heading_lower.contains(&name) {
        keyword_score + HEADING_BONUS
    } else {
        keyword_score
    }
}

/// Drop recitals like "upon the affidavit of complaint" before scoring
fn strip_recitals(text_lower: &str) -> String {
    AFFIDAVIT_RECITALS
        .iter()
        .fold(text_lower.to_string(), |text, recital| text.replace(recital, " "))
}

/// Classify document text, or `None` when no type scores at all
pub fn classify(text: &str) -> Option<DocumentType> {
    let lower = text.to_lowercase();
    let text_lower = strip_recitals(&lower);
    let heading_lower = lower
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(HEADING_LINES)
        .filter(|l| l.trim().len() <= HEADING_MAX_LEN)
        .collect::<Vec<_>>()
        .join("\n");

    let mut best: Option<(DocumentType, u32)> = None;
    for doc_type in PRECEDENCE {
        let s = score(&text_lower, &heading_lower, doc_type);
        debug!("Classification score for {}: {}", doc_type, s);
        if s > 0 && best.map_or(true, |(_, top)| s > top) {
            best = Some((doc_type, s));
        }
    }

    best.map(|(doc_type, _)| doc_type)
}

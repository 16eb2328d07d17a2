//! Labeled field extraction
//!
//! Court forms are filled as `Label: value` lines. Each canonical label has
//! a set of aliases seen on Tennessee forms; the first matching line wins.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{DocumentType, ExtractedData};

pub const DEFENDANT_NAME: &str = "Defendant Name";
pub const DATE_OF_BIRTH: &str = "Date of Birth";
pub const DEFENDANT_ADDRESS: &str = "Defendant Address";
pub const OFFENSE: &str = "Offense";
pub const OFFENSE_CODE: &str = "Offense Code";
pub const OFFENSE_DATE: &str = "Offense Date";
pub const OFFENSE_LOCATION: &str = "Offense Location";
pub const OFFICER: &str = "Officer";
pub const AGENCY: &str = "Agency";
pub const AFFIANT: &str = "Affiant";
pub const COURT_DATE: &str = "Court Date";
pub const PLACE_TO_BE_SEARCHED: &str = "Place to be Searched";
pub const ITEMS_TO_BE_SEIZED: &str = "Items to be Seized";
pub const JUDGE: &str = "Judge";

/// Canonical label and the alias alternation matched at the start of a line
const FIELD_ALIASES: &[(&str, &str)] = &[
    (
        DEFENDANT_NAME,
        r"defendant(?:'s)?\s+name|name\s+of\s+defendant|defendant|accused",
    ),
    (DATE_OF_BIRTH, r"date\s+of\s+birth|d\.?o\.?b\.?|birth\s*date"),
    (
        DEFENDANT_ADDRESS,
        r"defendant(?:'s)?\s+address|address\s+of\s+defendant|address|residence",
    ),
    (
        OFFENSE,
        r"offense\s+charged|offense|charged\s+offense|charges?|crime",
    ),
    (OFFENSE_CODE, r"offense\s+code|statute|statutory\s+citation|citation"),
    (
        OFFENSE_DATE,
        r"offense\s+date|date\s+of\s+offense|date\s+of\s+incident|incident\s+date",
    ),
    (
        OFFENSE_LOCATION,
        r"offense\s+location|location\s+of\s+offense|place\s+of\s+offense|location",
    ),
    (
        OFFICER,
        r"arresting\s+officer|officer\s+name|officer|complainant|deputy",
    ),
    (
        AGENCY,
        r"law\s+enforcement\s+agency|arresting\s+agency|agency|department",
    ),
    (AFFIANT, r"affiant(?:'s)?\s+name|affiant|sworn\s+by"),
    (
        COURT_DATE,
        r"court\s+date|appearance\s+date|date\s+to\s+appear|date\s+of\s+appearance",
    ),
    (
        PLACE_TO_BE_SEARCHED,
        r"place\s+to\s+be\s+searched|premises\s+to\s+be\s+searched|property\s+to\s+be\s+searched|premises",
    ),
    (
        ITEMS_TO_BE_SEIZED,
        r"items?\s+to\s+be\s+seized|property\s+to\s+be\s+seized|items\s+sought",
    ),
    (
        JUDGE,
        r"issuing\s+(?:judge|magistrate|official)|judicial\s+commissioner|magistrate|judge",
    ),
];

lazy_static! {
    static ref FIELD_PATTERNS: Vec<(&'static str, Regex)> = FIELD_ALIASES
        .iter()
        .map(|(label, aliases)| {
            let pattern = format!(r"(?im)^[ \t]*(?:{})[ \t]*:[ \t]*(\S[^\n]*?)[ \t]*$", aliases);
            (*label, Regex::new(&pattern).unwrap())
        })
        .collect();

    static ref PROBABLE_CAUSE_HEADING: Regex = Regex::new(
        r"(?i)^[ \t]*(?:statement\s+of\s+)?(?:facts\s+(?:establishing|supporting|constituting)\s+)?probable\s+cause(?:\s+statement)?[ \t]*:?[ \t]*(.*)$"
    )
    .unwrap();

    /// Lines that close a narrative section
    static ref SECTION_END: Regex = Regex::new(
        r"(?i)^[ \t]*(?:sworn|subscribed|signed|signature|witness\s+my\s+hand|issued|this\s+\d)"
    )
    .unwrap();
}

/// Labels collected for a document type, in output order
pub fn labels_for(doc_type: DocumentType) -> Vec<&'static str> {
    let mut labels = vec![
        DEFENDANT_NAME,
        DATE_OF_BIRTH,
        DEFENDANT_ADDRESS,
        OFFENSE,
        OFFENSE_CODE,
        OFFENSE_DATE,
        OFFENSE_LOCATION,
        OFFICER,
        AGENCY,
    ];
    match doc_type {
        DocumentType::AffidavitOfComplaint => labels.push(AFFIANT),
        DocumentType::CriminalSummons => labels.push(COURT_DATE),
        DocumentType::SearchWarrant => {
            labels.extend([PLACE_TO_BE_SEARCHED, ITEMS_TO_BE_SEIZED, JUDGE]);
        }
        DocumentType::ArrestWarrant => labels.push(JUDGE),
    }
    labels
}

/// Value of the first `Label: value` line for a canonical label
pub fn find_field(text: &str, label: &str) -> Option<String> {
    FIELD_PATTERNS
        .iter()
        .find(|(l, _)| *l == label)
        .and_then(|(_, re)| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Extract every labeled field relevant to the document type
pub fn extract_fields(text: &str, doc_type: DocumentType) -> ExtractedData {
    labels_for(doc_type)
        .into_iter()
        .filter_map(|label| find_field(text, label).map(|value| (label.to_string(), value)))
        .collect()
}

fn is_field_line(line: &str) -> bool {
    FIELD_PATTERNS.iter().any(|(_, re)| re.is_match(line))
}

/// All-caps title such as "JURAT" or "ORDER"
fn is_section_heading(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() <= 60
        && trimmed.chars().any(|c| c.is_alphabetic())
        && !trimmed.chars().any(|c| c.is_lowercase())
}

/// Narrative following a "Probable Cause" heading
///
/// The narrative ends at a blank line, the next labeled field, or a jurat.
/// Returns `None` when there is no heading, and an empty string when the
/// heading has no narrative after it.
pub fn probable_cause(text: &str) -> Option<String> {
    let mut lines = text.lines();
    let first = lines.by_ref().find_map(|line| {
        PROBABLE_CAUSE_HEADING
            .captures(line)
            .map(|caps| caps.get(1).map_or("", |m| m.as_str()).trim().to_string())
    })?;

    let mut parts = Vec::new();
    if !first.is_empty() {
        parts.push(first);
    }
    for line in lines {
        if is_field_line(line) || SECTION_END.is_match(line) || is_section_heading(line) {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if parts.is_empty() {
                continue;
            }
            break;
        }
        parts.push(trimmed.to_string());
    }

    Some(parts.join(" "))
}

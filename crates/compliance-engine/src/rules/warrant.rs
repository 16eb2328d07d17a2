use lazy_static::lazy_static;
use regex::Regex;
use shared_types::Issue;

use super::DocumentContext;
use crate::extractors::fields::JUDGE;

lazy_static! {
    /// "Issued by ...", "Signature of Judge ..." or a rule line above a title
    static ref SIGNATURE_LINE: Regex = Regex::new(
        r"(?im)^[ \t]*(?:issued\s+by|signed\s+by|signature\s+of|signed|_{3,})[^\n]*\b(?:judge|magistrate|judicial\s+commissioner|clerk)\b"
    )
    .unwrap();

    /// A bare title under a signature, e.g. "General Sessions Judge"
    static ref TITLE_LINE: Regex = Regex::new(
        r"(?im)^[ \t]*(?:[a-z.]+[ \t]+){0,3}(?:judge|magistrate|judicial\s+commissioner|clerk)[ \t]*$"
    )
    .unwrap();
}

/// True when a labelled field or the signature block names the issuer
fn names_issuing_official(ctx: &DocumentContext<'_>) -> bool {
    ctx.field(JUDGE).is_some()
        || SIGNATURE_LINE.is_match(ctx.text)
        || TITLE_LINE.is_match(ctx.text)
}

/// Warrants issue from a judge, magistrate or judicial commissioner
pub fn check_issuing_official(ctx: &DocumentContext<'_>) -> Vec<Issue> {
    if !ctx.doc_type.is_warrant() || names_issuing_official(ctx) {
        return Vec::new();
    }

    vec![Issue::warning(JUDGE, "No issuing judicial officer is identified.")
        .with_suggestion("Add the name and title of the issuing judge or magistrate.")]
}

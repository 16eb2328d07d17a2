use shared_types::{DocumentType, Issue};

use super::DocumentContext;
use crate::extractors::fields::{ITEMS_TO_BE_SEIZED, PLACE_TO_BE_SEARCHED};

/// Particularity: the premises and the property sought must be described
pub fn check_search_scope(ctx: &DocumentContext<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();
    if ctx.doc_type != DocumentType::SearchWarrant {
        return issues;
    }

    if ctx.field(PLACE_TO_BE_SEARCHED).is_none() {
        issues.push(
            Issue::error(PLACE_TO_BE_SEARCHED, "Place to be searched is not described.")
                .with_suggestion("Describe the premises with address and physical description."),
        );
    }
    if ctx.field(ITEMS_TO_BE_SEIZED).is_none() {
        issues.push(
            Issue::error(ITEMS_TO_BE_SEIZED, "Items to be seized are not described.")
                .with_suggestion("List the specific property or evidence sought."),
        );
    }

    issues
}

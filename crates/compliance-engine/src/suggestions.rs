//! Advisory suggestions that do not affect compliance

use crate::extractors::fields::{DATE_OF_BIRTH, OFFENSE};
use crate::extractors::{extract_dollar_amounts, theft_grade};
use crate::offenses::{find_by_description, find_citations};
use crate::patterns::{contains_any, THEFT_KEYWORDS, WITNESS_KEYWORDS};
use crate::rules::{requires_probable_cause, DocumentContext};

pub const WITNESS_SUGGESTION: &str = "Add witness names if available to strengthen probable cause.";
pub const THEFT_VALUE_SUGGESTION: &str =
    "Include the specific value of property for theft charges.";
pub const DOB_SUGGESTION: &str = "Verify defendant's date of birth against state records.";

pub fn collect_suggestions(ctx: &DocumentContext<'_>) -> Vec<String> {
    let mut suggestions = Vec::new();
    let narrative = ctx.probable_cause.as_deref().unwrap_or("");
    let narrative_lower = narrative.to_lowercase();

    if requires_probable_cause(ctx.doc_type) && !contains_any(&narrative_lower, WITNESS_KEYWORDS) {
        suggestions.push(WITNESS_SUGGESTION.to_string());
    }

    let offense = ctx.field(OFFENSE);
    let is_theft = offense
        .map(|o| contains_any(&o.to_lowercase(), THEFT_KEYWORDS))
        .unwrap_or(false);
    if is_theft {
        match extract_dollar_amounts(narrative)
            .into_iter()
            .reduce(f64::max)
        {
            None => suggestions.push(THEFT_VALUE_SUGGESTION.to_string()),
            Some(value) => suggestions.push(format!(
                "Property valued at ${:.2} is graded as a {} under T.C.A. § 39-14-105.",
                value,
                theft_grade(value)
            )),
        }
    }

    if ctx.field(DATE_OF_BIRTH).is_some() {
        suggestions.push(DOB_SUGGESTION.to_string());
    }

    if let Some(known) = offense.and_then(find_by_description) {
        if find_citations(ctx.text).is_empty() {
            suggestions.push(format!("{} is codified at {}.", known.name, known.citation()));
        }
    }

    suggestions
}

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::Issue;

use super::DocumentContext;
use crate::extractors::fields::{DATE_OF_BIRTH, DEFENDANT_ADDRESS, DEFENDANT_NAME};
use crate::extractors::find_date;

lazy_static! {
    static ref ZIP_PATTERN: Regex = Regex::new(r"\b\d{5}(?:-\d{4})?\b").unwrap();
}

const ADDRESS_HINT: &str = "Include complete mailing address with ZIP code for service purposes.";

/// Defendant identification: name, date of birth, service address
pub fn check_defendant(ctx: &DocumentContext<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();
    if !ctx.doc_type.names_defendant() {
        return issues;
    }

    if ctx.field(DEFENDANT_NAME).is_none() {
        issues.push(
            Issue::error(DEFENDANT_NAME, "Defendant name is missing.")
                .with_suggestion("State the defendant's full legal name."),
        );
    }

    match ctx.field(DATE_OF_BIRTH) {
        None => issues.push(
            Issue::warning(DATE_OF_BIRTH, "Defendant date of birth is missing.")
                .with_suggestion("Include date of birth to identify the defendant."),
        ),
        Some(value) => match find_date(value) {
            None => issues.push(
                Issue::warning(
                    DATE_OF_BIRTH,
                    format!("Date of birth '{}' is not a valid date.", value),
                )
                .with_suggestion("Use MM/DD/YYYY format."),
            ),
            Some(dob) if dob > ctx.today => issues.push(Issue::warning(
                DATE_OF_BIRTH,
                "Date of birth is in the future.",
            )),
            Some(_) => {}
        },
    }

    match ctx.field(DEFENDANT_ADDRESS) {
        None => issues.push(
            Issue::warning(DEFENDANT_ADDRESS, "Defendant address is missing.")
                .with_suggestion(ADDRESS_HINT),
        ),
        Some(address) if !ZIP_PATTERN.is_match(address) => issues.push(
            Issue::info(
                DEFENDANT_ADDRESS,
                "Defendant address is incomplete (missing ZIP code).",
            )
            .with_suggestion(ADDRESS_HINT),
        ),
        Some(_) => {}
    }

    issues
}

use shared_types::Issue;

use super::DocumentContext;
use crate::extractors::fields::{OFFENSE, OFFENSE_CODE};
use crate::offenses::{find_by_code, find_by_description, find_citations, format_citation};

const CITATION_FORMAT_HINT: &str = "Use full citation format: T.C.A. § [title]-[chapter]-[section]";

/// Every charging document cites the statute; citations use the
/// "T.C.A. § title-chapter-section" form and agree with the stated offense
pub fn check_offense_citation(ctx: &DocumentContext<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();
    let citations = find_citations(ctx.text);
    let stated = ctx.field(OFFENSE).and_then(find_by_description);

    if citations.is_empty() {
        let suggestion = match stated {
            Some(offense) => format!("Cite {} for {}.", offense.citation(), offense.name),
            None => CITATION_FORMAT_HINT.to_string(),
        };
        issues.push(
            Issue::error(OFFENSE_CODE, "No T.C.A. offense citation found.")
                .with_suggestion(suggestion),
        );
        return issues;
    }

    let mut reported: Vec<&str> = Vec::new();
    for citation in citations.iter().filter(|c| !c.canonical) {
        if reported.contains(&citation.code.as_str()) {
            continue;
        }
        reported.push(&citation.code);
        issues.push(
            Issue::warning(
                OFFENSE_CODE,
                format!(
                    "TCA citation format may be incorrect. Found '{}' but expected '{}'.",
                    citation.code,
                    format_citation(&citation.code)
                ),
            )
            .with_suggestion(CITATION_FORMAT_HINT),
        );
    }

    if let (Some(stated), Some(offense_text)) = (stated, ctx.field(OFFENSE)) {
        let cites_stated = citations.iter().any(|c| c.code == stated.code);
        let conflicting = citations
            .iter()
            .filter_map(|c| find_by_code(&c.code))
            .find(|o| o.code != stated.code);

        if let (false, Some(other)) = (cites_stated, conflicting) {
            issues.push(
                Issue::warning(
                    OFFENSE_CODE,
                    format!(
                        "Citation {} is for {}, but the offense stated is '{}'.",
                        other.citation(),
                        other.name,
                        offense_text
                    ),
                )
                .with_suggestion(format!(
                    "{} is codified at {}.",
                    stated.name,
                    stated.citation()
                )),
            );
        }
    }

    issues
}

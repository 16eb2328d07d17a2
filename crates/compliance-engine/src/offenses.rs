//! Tennessee offense catalog

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Title-chapter-section code, optionally preceded by a citation prefix
    static ref CODE_PATTERN: Regex =
        Regex::new(r"(?i)(T\.?\s*C\.?\s*A\.?\s*(?:§+|sec(?:tion)?\.?)?\s*)?\b(\d{2}-\d{1,2}-\d{3})\b")
            .unwrap();

    /// Canonical citation prefix
    static ref CANONICAL_PREFIX: Regex = Regex::new(r"^T\.C\.A\. §\s?$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offense {
    /// Form value used by the document generator
    pub key: &'static str,
    pub name: &'static str,
    pub code: &'static str,
    /// Lowercase phrases an offense description may start with
    aliases: &'static [&'static str],
}

impl Offense {
    /// "T.C.A. § 39-14-103"
    pub fn citation(&self) -> String {
        format_citation(self.code)
    }

    /// "Theft of Property (T.C.A. § 39-14-103)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.citation())
    }
}

pub const OFFENSES: &[Offense] = &[
    Offense {
        key: "theft",
        name: "Theft of Property",
        code: "39-14-103",
        aliases: &["theft of property", "theft", "shoplifting"],
    },
    Offense {
        key: "assault",
        name: "Assault",
        code: "39-13-101",
        aliases: &["simple assault", "assault"],
    },
    Offense {
        key: "dui",
        name: "DUI",
        code: "55-10-401",
        aliases: &["driving under the influence", "dui", "dwi"],
    },
    Offense {
        key: "drugs",
        name: "Simple Possession",
        code: "39-17-418",
        aliases: &["simple possession", "simple casual exchange", "possession"],
    },
    Offense {
        key: "domestic",
        name: "Domestic Assault",
        code: "39-13-111",
        aliases: &["domestic assault", "domestic violence"],
    },
];

/// A statute code found in document text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationMatch {
    pub code: String,
    /// Whether it was written as "T.C.A. § NN-NN-NNN"
    pub canonical: bool,
}

pub fn format_citation(code: &str) -> String {
    format!("T.C.A. § {}", code)
}

/// Every statute code in the text, in order of appearance
pub fn find_citations(text: &str) -> Vec<CitationMatch> {
    CODE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let code = caps.get(2)?.as_str().to_string();
            let canonical = caps
                .get(1)
                .is_some_and(|prefix| CANONICAL_PREFIX.is_match(prefix.as_str()));
            Some(CitationMatch { code, canonical })
        })
        .collect()
}

pub fn find_by_key(key: &str) -> Option<&'static Offense> {
    OFFENSES.iter().find(|o| o.key.eq_ignore_ascii_case(key.trim()))
}

pub fn find_by_code(code: &str) -> Option<&'static Offense> {
    OFFENSES.iter().find(|o| o.code == code.trim())
}

/// Catalog offense a description begins with, preferring the longest alias
///
/// "Domestic Assault" is not read as "Assault", and qualified offenses such
/// as "Aggravated Assault" match nothing.
pub fn find_by_description(description: &str) -> Option<&'static Offense> {
    let lower = description.trim().to_lowercase();
    OFFENSES
        .iter()
        .flat_map(|o| o.aliases.iter().map(move |a| (o, *a)))
        .filter(|(_, alias)| starts_with_word(&lower, alias))
        .max_by_key(|(_, alias)| alias.len())
        .map(|(o, _)| o)
}

fn starts_with_word(text: &str, prefix: &str) -> bool {
    text.strip_prefix(prefix)
        .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_citation_format() {
        let theft = find_by_key("theft").unwrap();
        assert_eq!(theft.citation(), "T.C.A. § 39-14-103");
        assert_eq!(theft.label(), "Theft of Property (T.C.A. § 39-14-103)");
    }

    #[test]
    fn test_find_by_description() {
        assert_eq!(
            find_by_description("Theft of Property over $1,000").map(|o| o.key),
            Some("theft")
        );
        assert_eq!(find_by_description("Domestic Assault").map(|o| o.key), Some("domestic"));
        assert_eq!(find_by_description("DUI - first offense").map(|o| o.key), Some("dui"));
        assert_eq!(find_by_description("Aggravated Assault"), None);
        assert_eq!(find_by_description("Duress"), None);
    }

    #[test]
    fn test_find_citations() {
        let found = find_citations("Charged under T.C.A. § 39-14-103 and 55-10-401.");
        assert_eq!(
            found,
            vec![
                CitationMatch {
                    code: "39-14-103".to_string(),
                    canonical: true
                },
                CitationMatch {
                    code: "55-10-401".to_string(),
                    canonical: false
                },
            ]
        );
    }

    #[test]
    fn test_loose_prefix_is_not_canonical() {
        let found = find_citations("TCA 39-13-101");
        assert_eq!(found.len(), 1);
        assert!(!found[0].canonical);
    }

    #[test]
    fn test_dates_and_phone_numbers_are_not_codes() {
        assert!(find_citations("on 2024-01-28, call 901-476-1234").is_empty());
    }

    #[test]
    fn test_find_by_code() {
        assert_eq!(find_by_code("39-13-111").map(|o| o.name), Some("Domestic Assault"));
        assert_eq!(find_by_code("39-13-102"), None);
    }
}

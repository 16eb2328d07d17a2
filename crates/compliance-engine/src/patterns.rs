//! Keyword lists used for classification and rule checks
//!
//! All keywords are lowercase and matched against lowercased text.

/// Weighted classification keywords: (phrase, weight)
pub const ARREST_WARRANT_KEYWORDS: &[(&str, u32)] = &[
    ("arrest warrant", 10),
    ("warrant for arrest", 8),
    ("to any lawful officer", 3),
    ("take into custody", 3),
    ("arrest", 2),
    ("warrant", 2),
];

pub const AFFIDAVIT_KEYWORDS: &[(&str, u32)] = &[
    ("affidavit of complaint", 10),
    ("affidavit", 6),
    ("affiant", 4),
    ("complaint", 1),
    ("sworn", 1),
];

pub const SUMMONS_KEYWORDS: &[(&str, u32)] = &[
    ("criminal summons", 10),
    ("summons", 6),
    ("commanded to appear", 4),
    ("notice to appear", 4),
    ("court date", 2),
    ("appear before", 2),
];

pub const SEARCH_WARRANT_KEYWORDS: &[(&str, u32)] = &[
    ("search warrant", 10),
    ("place to be searched", 5),
    ("items to be seized", 5),
    ("seize", 2),
    ("premises", 1),
    ("search", 1),
];

/// Bonus when the type's name appears in the document heading
pub const HEADING_BONUS: u32 = 20;

/// Non-empty lines considered part of the heading (court caption, style of
/// the case and docket number come before the title)
pub const HEADING_LINES: usize = 10;

/// Warrant recitals that cite the supporting affidavit; they do not make the
/// document an affidavit
pub const AFFIDAVIT_RECITALS: &[&str] = &[
    "upon the affidavit of complaint",
    "upon affidavit of complaint",
    "based upon the affidavit of complaint",
    "based on the affidavit of complaint",
    "upon the sworn affidavit of complaint",
];

/// Longer lines are body text, not titles
pub const HEADING_MAX_LEN: usize = 60;

/// Oath or affirmation language in a jurat
pub const OATH_KEYWORDS: &[&str] = &[
    "sworn",
    "subscribed",
    "under oath",
    "affirmed",
    "under penalty of perjury",
];

pub const WITNESS_KEYWORDS: &[&str] = &["witness", "eyewitness", "observed by", "reported by"];

/// Offense descriptions that call for a stated property value
pub const THEFT_KEYWORDS: &[&str] = &["theft", "shoplifting", "larceny", "stolen"];

/// Minimum words for a probable cause statement to count as specific
pub const MIN_PROBABLE_CAUSE_WORDS: usize = 25;

/// Check whether any keyword occurs in already-lowercased text
pub fn contains_any(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text_lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_any() {
        assert!(contains_any("sworn to and subscribed before me", OATH_KEYWORDS));
        assert!(!contains_any("signed by the officer", OATH_KEYWORDS));
    }

    #[test]
    fn test_keywords_are_lowercase() {
        let tables = [
            ARREST_WARRANT_KEYWORDS,
            AFFIDAVIT_KEYWORDS,
            SUMMONS_KEYWORDS,
            SEARCH_WARRANT_KEYWORDS,
        ];
        for (phrase, _) in tables.iter().flat_map(|t| t.iter()) {
            assert_eq!(*phrase, phrase.to_lowercase());
        }
    }
}

// Date and time detection in field values and narrative text
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// 01/28/2024, 1/28/24, 2024-01-28, January 28, 2024, Jan. 28th 2024
    static ref DATE_PATTERN: Regex = Regex::new(
        r"(?i)\b(?:\d{1,2}/\d{1,2}/\d{2,4}|\d{4}-\d{1,2}-\d{1,2}|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4})\b"
    )
    .unwrap();

    /// 10:30 PM, 22:15, 2215 hours
    static ref TIME_PATTERN: Regex = Regex::new(
        r"(?i)\b(?:\d{1,2}:\d{2}(?:\s*[ap]\.?m\.?)?|\d{1,2}\s*[ap]\.m\.|\d{3,4}\s+hours)"
    )
    .unwrap();

    static ref ORDINAL_SUFFIX: Regex = Regex::new(r"(?i)(\d)(?:st|nd|rd|th)\b").unwrap();
}

/// Parse a single date string in the formats officers write on forms
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let cleaned = ORDINAL_SUFFIX
        .replace_all(value.trim(), "$1")
        .replace([',', '.'], " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.contains('/') {
        let year_digits = cleaned.rsplit('/').next().map_or(0, str::len);
        let format = if year_digits == 2 { "%m/%d/%y" } else { "%m/%d/%Y" };
        return NaiveDate::parse_from_str(&cleaned, format).ok();
    }

    if cleaned.contains('-') {
        return NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d").ok();
    }

    // chrono accepts month abbreviations for %B but not "Sept"
    let cleaned = cleaned.replace("Sept ", "Sep ").replace("sept ", "sep ");
    NaiveDate::parse_from_str(&cleaned, "%B %d %Y").ok()
}

/// First parseable date anywhere in the text
pub fn find_date(text: &str) -> Option<NaiveDate> {
    DATE_PATTERN
        .find_iter(text)
        .find_map(|m| parse_date(m.as_str()))
}

/// Whether the text mentions any date-like or time-like token
pub fn has_date_or_time(text: &str) -> bool {
    DATE_PATTERN.is_match(text) || TIME_PATTERN.is_match(text)
}

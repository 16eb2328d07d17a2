// Numeric extraction utilities for theft valuation
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DOLLAR_PATTERN: Regex =
        Regex::new(r"(?i)\$\s?(\d[\d,]*(?:\.\d{2})?)|\b(\d[\d,]*(?:\.\d{2})?)\s+dollars\b").unwrap();
}

/// Dollar amounts mentioned in the text, in order of appearance
pub fn extract_dollar_amounts(text: &str) -> Vec<f64> {
    DOLLAR_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .filter_map(|m| m.as_str().replace(',', "").parse::<f64>().ok())
        .collect()
}

pub fn has_dollar_amount(text: &str) -> bool {
    !extract_dollar_amounts(text).is_empty()
}

/// Theft grade under T.C.A. § 39-14-105 for a property value
pub fn theft_grade(value: f64) -> &'static str {
    match value {
        v if v <= 1_000.0 => "Class A misdemeanor",
        v if v <= 2_500.0 => "Class E felony",
        v if v <= 10_000.0 => "Class D felony",
        v if v <= 60_000.0 => "Class C felony",
        v if v <= 250_000.0 => "Class B felony",
        _ => "Class A felony",
    }
}

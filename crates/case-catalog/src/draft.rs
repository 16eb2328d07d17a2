//! Draft generation from a template and the generator form
//!
//! The form is validated field by field, then rendered as `Label: value`
//! lines the compliance engine reads back. Field names in errors are the
//! form's own (camelCase) names.

use chrono::{NaiveDate, NaiveTime};
use compliance_engine::offenses::{find_by_key, Offense};
use compliance_engine::patterns::MIN_PROBABLE_CAUSE_WORDS;
use compliance_engine::{TennesseeCourtCalendar, OFFENSES};
use serde::{Deserialize, Serialize};
use shared_types::{DocumentType, Template, TemplateKind};
use thiserror::Error;
use tracing::debug;

/// Court days between today and the default summons appearance
pub const DEFAULT_SUMMONS_COURT_DAYS: u32 = 10;

const DISPLAY_DATE: &str = "%m/%d/%Y";
const DISPLAY_TIME: &str = "%-I:%M %p";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl DraftError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DraftError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            DraftError::InvalidField { field, .. } => field,
        }
    }
}

/// Option of the generator's offense select
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffenseChoice {
    pub value: &'static str,
    pub label: String,
}

pub fn offense_choices() -> Vec<OffenseChoice> {
    OFFENSES
        .iter()
        .map(|o| OffenseChoice {
            value: o.key,
            label: o.label(),
        })
        .collect()
}

/// Document type a template produces
pub fn document_type_for(kind: TemplateKind) -> DocumentType {
    match kind {
        TemplateKind::Warrant => DocumentType::ArrestWarrant,
        TemplateKind::Affidavit => DocumentType::AffidavitOfComplaint,
        TemplateKind::Summons => DocumentType::CriminalSummons,
    }
}

/// Generator form as submitted; dates are `YYYY-MM-DD`, times `HH:MM`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateDraftInput {
    /// "Last, First Middle"
    pub defendant_name: String,
    pub date_of_birth: String,
    pub ssn_last4: Option<String>,
    /// "Street, City, State ZIP"
    pub address: String,
    /// Offense catalog key, e.g. "theft"
    pub offense: String,
    pub offense_date: String,
    pub offense_time: String,
    pub location: String,
    pub probable_cause: String,
    pub officer: Option<String>,
    pub badge: Option<String>,
    pub agency: Option<String>,
    /// Summons only; defaults to ten court days out
    pub court_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDraft {
    pub template_id: String,
    pub document_type: DocumentType,
    pub text: String,
}

/// Validated form values
struct DraftFields<'a> {
    defendant_name: String,
    date_of_birth: NaiveDate,
    ssn_last4: Option<&'a str>,
    address: String,
    offense: &'static Offense,
    offense_date: NaiveDate,
    offense_time: NaiveTime,
    location: String,
    probable_cause: String,
    officer: Option<String>,
    agency: Option<String>,
    court_date: Option<NaiveDate>,
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, DraftError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DraftError::invalid(field, "is required"));
    }
    Ok(value)
}

/// Collapse runs of whitespace, line breaks included, to single spaces so a
/// value cannot start a new `Label:` line
fn one_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Blank optional inputs count as absent
fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn form_date(field: &'static str, value: &str) -> Result<NaiveDate, DraftError> {
    let value = required(field, value)?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| DraftError::invalid(field, format!("'{}' is not a YYYY-MM-DD date", value)))
}

fn validate_name(value: &str) -> Result<&str, DraftError> {
    let name = required("defendantName", value)?;
    let full = match name.split_once(',') {
        Some((last, first)) => !last.trim().is_empty() && !first.trim().is_empty(),
        None => name.split_whitespace().count() >= 2,
    };
    if !full {
        return Err(DraftError::invalid(
            "defendantName",
            "enter the full legal name as \"Last, First Middle\"",
        ));
    }
    Ok(name)
}

fn validate_ssn(value: Option<&str>) -> Result<Option<&str>, DraftError> {
    match value {
        Some(ssn) if ssn.len() != 4 || !ssn.chars().all(|c| c.is_ascii_digit()) => Err(
            DraftError::invalid("ssnLast4", "must be exactly 4 digits"),
        ),
        other => Ok(other),
    }
}

fn validate<'a>(
    kind: TemplateKind,
    input: &'a TemplateDraftInput,
    today: NaiveDate,
) -> Result<DraftFields<'a>, DraftError> {
    let defendant_name = one_line(validate_name(&input.defendant_name)?);

    let date_of_birth = form_date("dateOfBirth", &input.date_of_birth)?;
    if date_of_birth >= today {
        return Err(DraftError::invalid("dateOfBirth", "must be in the past"));
    }

    let ssn_last4 = validate_ssn(optional(&input.ssn_last4))?;
    let address = one_line(required("address", &input.address)?);

    let offense_key = required("offense", &input.offense)?;
    let offense = find_by_key(offense_key).ok_or_else(|| {
        DraftError::invalid("offense", format!("'{}' is not a listed offense", offense_key))
    })?;

    let offense_date = form_date("offenseDate", &input.offense_date)?;
    if offense_date > today {
        return Err(DraftError::invalid("offenseDate", "cannot be in the future"));
    }
    let time = required("offenseTime", &input.offense_time)?;
    let offense_time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| DraftError::invalid("offenseTime", format!("'{}' is not an HH:MM time", time)))?;

    let location = one_line(required("location", &input.location)?);

    let probable_cause = one_line(required("probableCause", &input.probable_cause)?);
    let words = probable_cause.split(' ').count();
    if words < MIN_PROBABLE_CAUSE_WORDS {
        return Err(DraftError::invalid(
            "probableCause",
            format!(
                "describe the facts in at least {} words ({} given)",
                MIN_PROBABLE_CAUSE_WORDS, words
            ),
        ));
    }

    let officer = optional(&input.officer).map(|name| match optional(&input.badge) {
        Some(badge) => format!("{} #{}", one_line(name), one_line(badge.trim_start_matches('#'))),
        None => one_line(name),
    });
    if officer.is_none() && kind == TemplateKind::Affidavit {
        return Err(DraftError::invalid(
            "officer",
            "the affiant must be identified on an affidavit",
        ));
    }

    let court_date = match kind {
        TemplateKind::Summons => Some(summons_court_date(input, offense_date, today)?),
        _ => None,
    };

    Ok(DraftFields {
        defendant_name,
        date_of_birth,
        ssn_last4,
        address,
        offense,
        offense_date,
        offense_time,
        location,
        probable_cause,
        officer,
        agency: optional(&input.agency).map(one_line),
        court_date,
    })
}

fn summons_court_date(
    input: &TemplateDraftInput,
    offense_date: NaiveDate,
    today: NaiveDate,
) -> Result<NaiveDate, DraftError> {
    let date = match optional(&input.court_date) {
        Some(value) => form_date("courtDate", value)?,
        None => TennesseeCourtCalendar::add_business_days(today, DEFAULT_SUMMONS_COURT_DAYS)
            .ok_or_else(|| DraftError::invalid("courtDate", "no court day available"))?,
    };

    if date <= offense_date {
        return Err(DraftError::invalid("courtDate", "must be after the offense date"));
    }
    if !TennesseeCourtCalendar::is_business_day(date) {
        let next = TennesseeCourtCalendar::next_business_day(date)
            .map(|d| format!("; the next court day is {}", d.format(DISPLAY_DATE)))
            .unwrap_or_default();
        return Err(DraftError::invalid(
            "courtDate",
            format!("{} is not a court day{}", date.format(DISPLAY_DATE), next),
        ));
    }
    Ok(date)
}

fn heading(doc_type: DocumentType) -> &'static str {
    match doc_type {
        DocumentType::ArrestWarrant => "ARREST WARRANT",
        DocumentType::AffidavitOfComplaint => "AFFIDAVIT OF COMPLAINT",
        DocumentType::CriminalSummons => "CRIMINAL SUMMONS",
        DocumentType::SearchWarrant => "SEARCH WARRANT",
    }
}

fn render(template: &Template, doc_type: DocumentType, f: &DraftFields<'_>, today: NaiveDate) -> String {
    let offense_date = f.offense_date.format(DISPLAY_DATE);
    let offense_time = f.offense_time.format(DISPLAY_TIME);

    let mut lines = vec![
        "STATE OF TENNESSEE".to_string(),
        heading(doc_type).to_string(),
        template.name.clone(),
        String::new(),
        format!("Defendant Name: {}", f.defendant_name),
        format!("Date of Birth: {}", f.date_of_birth.format(DISPLAY_DATE)),
    ];
    if let Some(ssn) = f.ssn_last4 {
        lines.push(format!("SSN (Last 4): XXX-XX-{}", ssn));
    }
    lines.extend([
        format!("Defendant Address: {}", f.address),
        format!("Offense: {}", f.offense.name),
        format!("Offense Code: {}", f.offense.citation()),
        format!("Offense Date: {} at {}", offense_date, offense_time),
        format!("Offense Location: {}", f.location),
    ]);
    if let Some(officer) = &f.officer {
        let label = match doc_type {
            DocumentType::AffidavitOfComplaint => "Affiant",
            _ => "Officer",
        };
        lines.push(format!("{}: {}", label, officer));
    }
    if let Some(agency) = &f.agency {
        lines.push(format!("Agency: {}", agency));
    }
    if let Some(court_date) = f.court_date {
        lines.push(format!("Court Date: {}", court_date.format(DISPLAY_DATE)));
    }

    lines.extend([
        String::new(),
        "Probable Cause:".to_string(),
        format!(
            "On {} at {}, at {}, {}",
            offense_date, offense_time, f.location, f.probable_cause
        ),
        String::new(),
    ]);

    match doc_type {
        DocumentType::AffidavitOfComplaint => lines.extend([
            "The affiant, being duly sworn, states that the facts above are true to the best of the affiant's knowledge.".to_string(),
            format!(
                "Sworn to and subscribed before me on {}.",
                today.format(DISPLAY_DATE)
            ),
            String::new(),
            "Signature of Judge, Magistrate or Clerk: ______________________".to_string(),
        ]),
        DocumentType::CriminalSummons => lines.push(format!(
            "You are hereby commanded to appear before the General Sessions Court on {} at 9:00 AM to answer the charge stated above.",
            f.court_date.map(|d| d.format(DISPLAY_DATE).to_string()).unwrap_or_default()
        )),
        DocumentType::ArrestWarrant | DocumentType::SearchWarrant => lines.extend([
            "To any lawful officer of the State of Tennessee: you are commanded to arrest the defendant named above and bring the defendant before the court to answer the charge.".to_string(),
            String::new(),
            "Signature of Judge or Magistrate: ______________________".to_string(),
        ]),
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Validate the generator form and render a draft of the template's type
pub fn generate_draft(
    template: &Template,
    input: &TemplateDraftInput,
    today: NaiveDate,
) -> Result<GeneratedDraft, DraftError> {
    let doc_type = document_type_for(template.kind);
    let fields = validate(template.kind, input, today)?;
    let text = render(template, doc_type, &fields, today);
    debug!(
        "Generated {} draft from template {} ({} bytes)",
        doc_type,
        template.id,
        text.len()
    );

    Ok(GeneratedDraft {
        template_id: template.id.clone(),
        document_type: doc_type,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{find_template, sample_templates};
    use compliance_engine::ComplianceEngine;
    use pretty_assertions::assert_eq;
    use shared_types::Severity;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()
    }

    fn input() -> TemplateDraftInput {
        TemplateDraftInput {
            defendant_name: "Smith, John Michael".to_string(),
            date_of_birth: "1985-05-15".to_string(),
            ssn_last4: Some("4821".to_string()),
            address: "412 Oak Street, Covington, TN 38019".to_string(),
            offense: "theft".to_string(),
            offense_date: "2024-01-28".to_string(),
            offense_time: "22:30".to_string(),
            location: "Dollar General, 1200 Highway 51 South, Covington".to_string(),
            probable_cause: "the store manager observed the defendant remove two cordless drills \
                             from a display, conceal them inside his jacket, and leave the store \
                             through the front entrance without paying for the merchandise."
                .to_string(),
            officer: Some("Deputy James Wilson".to_string()),
            badge: Some("4521".to_string()),
            agency: Some("Tipton County Sheriff's Office".to_string()),
            court_date: None,
        }
    }

    fn generate(id: &str, input: &TemplateDraftInput) -> Result<GeneratedDraft, DraftError> {
        generate_draft(&find_template(id).unwrap(), input, today())
    }

    #[test]
    fn test_every_template_yields_compliant_document_of_its_type() {
        let engine = ComplianceEngine::new();
        for template in sample_templates() {
            let draft = generate_draft(&template, &input(), today()).unwrap();
            let result = engine.analyze_text(&draft.text, today()).unwrap();

            assert_eq!(result.document_type(), document_type_for(template.kind), "{}", template.name);
            assert_eq!(
                result.count(Severity::Error),
                0,
                "{}: {:?}",
                template.name,
                result.issues()
            );
            assert!(result.compliant());
        }
    }

    #[test]
    fn test_warrant_layout() {
        let draft = generate("1", &input()).unwrap();
        assert_eq!(draft.document_type, DocumentType::ArrestWarrant);
        assert!(draft.text.starts_with("STATE OF TENNESSEE\nARREST WARRANT\nStandard Arrest Warrant\n"));
        assert!(draft.text.contains("Offense Code: T.C.A. § 39-14-103\n"));
        assert!(draft.text.contains("Offense Date: 01/28/2024 at 10:30 PM\n"));
        assert!(draft.text.contains("Officer: Deputy James Wilson #4521\n"));
        assert!(draft.text.contains("SSN (Last 4): XXX-XX-4821\n"));
    }

    #[test]
    fn test_extracted_fields_round_trip_form_values() {
        let draft = generate("2", &input()).unwrap();
        let result = ComplianceEngine::new().analyze_text(&draft.text, today()).unwrap();
        let data = result.extracted_data();
        assert_eq!(data.get("Defendant Name"), Some("Smith, John Michael"));
        assert_eq!(data.get("Affiant"), Some("Deputy James Wilson #4521"));
        assert_eq!(data.get("Offense"), Some("Theft of Property"));
    }

    #[test]
    fn test_summons_defaults_to_ten_court_days() {
        let draft = generate("3", &input()).unwrap();
        let expected = TennesseeCourtCalendar::add_business_days(today(), 10).unwrap();
        let line = format!("Court Date: {}\n", expected.format("%m/%d/%Y"));
        assert!(draft.text.contains(&line), "{}", draft.text);
    }

    #[test]
    fn test_summons_rejects_weekend_court_date() {
        let mut form = input();
        form.court_date = Some("2024-03-02".to_string());
        let err = generate("3", &form).unwrap_err();
        assert_eq!(err.field(), "courtDate");
        assert!(err.to_string().contains("next court day is 03/04/2024"), "{}", err);
    }

    #[test]
    fn test_summons_court_date_after_offense() {
        let mut form = input();
        form.court_date = Some("2024-01-26".to_string());
        assert_eq!(generate("3", &form).unwrap_err().field(), "courtDate");
    }

    #[test]
    fn test_affidavit_requires_officer() {
        let mut form = input();
        form.officer = Some("  ".to_string());
        assert_eq!(generate("5", &form).unwrap_err().field(), "officer");

        // warrants may leave the officer blank
        assert!(generate("1", &form).is_ok());
    }

    #[test]
    fn test_field_validation() {
        let cases: Vec<(&'static str, Box<dyn Fn(&mut TemplateDraftInput)>)> = vec![
            ("defendantName", Box::new(|f| f.defendant_name = "Smith".to_string())),
            ("defendantName", Box::new(|f| f.defendant_name = "Smith, ".to_string())),
            ("dateOfBirth", Box::new(|f| f.date_of_birth = "05/15/1985".to_string())),
            ("dateOfBirth", Box::new(|f| f.date_of_birth = "2030-01-01".to_string())),
            ("ssnLast4", Box::new(|f| f.ssn_last4 = Some("482".to_string()))),
            ("ssnLast4", Box::new(|f| f.ssn_last4 = Some("48a1".to_string()))),
            ("address", Box::new(|f| f.address.clear())),
            ("offense", Box::new(|f| f.offense = "arson".to_string())),
            ("offenseDate", Box::new(|f| f.offense_date = "2024-02-06".to_string())),
            ("offenseTime", Box::new(|f| f.offense_time = "10:30 PM".to_string())),
            ("location", Box::new(|f| f.location = " ".to_string())),
            ("probableCause", Box::new(|f| f.probable_cause = "He stole drills.".to_string())),
        ];

        for (field, mutate) in cases {
            let mut form = input();
            mutate(&mut form);
            assert_eq!(generate("1", &form).unwrap_err().field(), field);
        }
    }

    #[test]
    fn test_line_breaks_cannot_add_labelled_lines() {
        let mut form = input();
        form.defendant_name = "Smith, John\nOffense Code: 39-13-101".to_string();
        form.address = "412 Oak Street,\r\nCovington, TN 38019".to_string();
        form.location = "Dollar General\nJudge: Hon. Nobody".to_string();
        form.agency = Some("Tipton County\nSheriff's Office".to_string());
        form.officer = Some("Deputy\nJames Wilson".to_string());

        let draft = generate("1", &form).unwrap();
        assert!(draft.text.contains("Defendant Name: Smith, John Offense Code: 39-13-101\n"));
        assert!(draft.text.contains("Defendant Address: 412 Oak Street, Covington, TN 38019\n"));
        assert!(draft.text.contains("Agency: Tipton County Sheriff's Office\n"));
        assert!(draft.text.contains("Officer: Deputy James Wilson #4521\n"));
        assert!(!draft.text.contains("\nJudge:"));

        let result = ComplianceEngine::new().analyze_text(&draft.text, today()).unwrap();
        assert_eq!(
            result.extracted_data().get("Offense Code"),
            Some("T.C.A. § 39-14-103")
        );
    }

    #[test]
    fn test_blank_ssn_is_omitted() {
        let mut form = input();
        form.ssn_last4 = Some(String::new());
        let draft = generate("1", &form).unwrap();
        assert!(!draft.text.contains("SSN"));
    }

    #[test]
    fn test_form_deserializes_with_missing_optionals() {
        let form: TemplateDraftInput = serde_json::from_str(
            r#"{"defendantName":"Smith, John","dateOfBirth":"1985-05-15","offense":"dui"}"#,
        )
        .unwrap();
        assert_eq!(form.offense, "dui");
        assert_eq!(form.officer, None);
        assert_eq!(generate("1", &form).unwrap_err().field(), "address");
    }

    #[test]
    fn test_offense_choices() {
        let choices = offense_choices();
        assert_eq!(choices.len(), 5);
        assert_eq!(choices[0].value, "theft");
        assert_eq!(choices[0].label, "Theft of Property (T.C.A. § 39-14-103)");
    }
}

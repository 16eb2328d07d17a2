//! Document template catalog

use shared_types::{Template, TemplateKind};

fn template(
    id: &str,
    name: &str,
    description: &str,
    kind: TemplateKind,
    last_used: &str,
    uses: u32,
) -> Template {
    Template {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        kind,
        last_used: last_used.to_string(),
        uses,
    }
}

pub fn sample_templates() -> Vec<Template> {
    use TemplateKind::*;

    vec![
        template(
            "1",
            "Standard Arrest Warrant",
            "AOC-compliant arrest warrant template for all felony and misdemeanor offenses",
            Warrant,
            "Today",
            156,
        ),
        template(
            "2",
            "Affidavit of Complaint",
            "Sworn statement establishing probable cause for arrest or summons",
            Affidavit,
            "Today",
            134,
        ),
        template(
            "3",
            "Criminal Summons",
            "Notice to appear for misdemeanor charges not requiring immediate custody",
            Summons,
            "Yesterday",
            89,
        ),
        template(
            "4",
            "Felony Arrest Warrant",
            "Enhanced template for Class A-E felony offenses with special provisions",
            Warrant,
            "2 days ago",
            45,
        ),
        template(
            "5",
            "DUI Affidavit",
            "Specialized affidavit for DUI/DWI charges with BAC and field sobriety fields",
            Affidavit,
            "3 days ago",
            67,
        ),
        template(
            "6",
            "Domestic Violence Warrant",
            "Arrest warrant with victim information and bond condition provisions",
            Warrant,
            "1 week ago",
            38,
        ),
    ]
}

/// Templates of one kind, or all of them
pub fn filter_templates(kind: Option<TemplateKind>) -> Vec<Template> {
    sample_templates()
        .into_iter()
        .filter(|t| kind.map_or(true, |k| t.kind == k))
        .collect()
}

pub fn find_template(id: &str) -> Option<Template> {
    sample_templates().into_iter().find(|t| t.id == id.trim())
}

//! CSV export of the full record set.
//!
//! One row per investigation; corrective actions are folded into a single
//! column as "[X] description (DD/MM/YYYY)" entries joined by " | ".

use chrono::NaiveDate;

use crate::models::Investigation;

const HEADERS: [&str; 8] = [
    "Folio",
    "Nombre",
    "Edad",
    "Área",
    "Antigüedad",
    "Fecha",
    "Declaración de Accidente",
    "Acciones Correctivas",
];

/// Render all records as a single CSV document. Empty input yields the
/// empty string.
pub fn export_all_csv(records: &[Investigation]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let rows: Vec<String> = records
        .iter()
        .map(|record| {
            let actions = record
                .corrective_actions
                .iter()
                .map(|action| {
                    format!(
                        "[{}] {} ({})",
                        if action.completed { "X" } else { " " },
                        action.description,
                        format_date_dmy(&action.due_date)
                    )
                })
                .collect::<Vec<_>>()
                .join(" | ");

            [
                record.folio_id.clone(),
                quote(&record.subject_name),
                record.subject_age.clone(),
                quote(&record.area),
                record.seniority.clone(),
                format_date_dmy(&record.incident_date),
                quote(&record.accident_statement),
                quote(&actions),
            ]
            .join(",")
        })
        .collect();

    format!("{}\n{}", HEADERS.join(","), rows.join("\n"))
}

/// Re-render an ISO date as DD/MM/YYYY for display; anything unparseable
/// passes through unchanged.
fn format_date_dmy(iso_date: &str) -> String {
    match NaiveDate::parse_from_str(iso_date, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => iso_date.to_string(),
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

//! Linear-scan record search (case-insensitive substring match)

use crate::models::{Investigation, SearchField};

/// Filter records whose selected field contains the trimmed term,
/// case-insensitively. A blank term matches nothing.
pub fn search<'a>(
    records: &'a [Investigation],
    term: &str,
    field: SearchField,
) -> Vec<&'a Investigation> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|record| {
            let value = match field {
                SearchField::FolioId => &record.folio_id,
                SearchField::SubjectName => &record.subject_name,
            };
            value.to_lowercase().contains(&term)
        })
        .collect()
}

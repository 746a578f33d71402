//! Accident investigation record and its corrective actions

use serde::{Deserialize, Serialize};

/// A remediation task attached to an investigation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectiveAction {
    /// Unique within the owning record, assigned by the form
    pub id: String,
    pub description: String,
    /// ISO date (YYYY-MM-DD); may be empty when the action is completed
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub completed: bool,
    /// Base64 compressed image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

/// Named signature blobs captured on the form. Presence, not content,
/// is what matters to the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injured_party: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_committee_member: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_dept: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_supervisor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_manager: Option<String>,
}

/// A workplace-accident investigation record, keyed by folio ID
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investigation {
    /// Zero-padded 6-digit sequence number ("000042"), immutable once assigned
    pub folio_id: String,
    pub subject_name: String,
    pub subject_age: String,
    pub area: String,
    pub seniority: String,
    /// ISO date (YYYY-MM-DD)
    pub incident_date: String,
    pub accident_statement: String,
    #[serde(default)]
    pub corrective_actions: Vec<CorrectiveAction>,
    #[serde(default)]
    pub signatures: Signatures,
}

impl Investigation {
    /// Validate required fields before the record reaches the store.
    /// An incomplete corrective action must carry a due date.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("folioId", &self.folio_id),
            ("subjectName", &self.subject_name),
            ("subjectAge", &self.subject_age),
            ("area", &self.area),
            ("seniority", &self.seniority),
            ("incidentDate", &self.incident_date),
            ("accidentStatement", &self.accident_statement),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(format!("Missing required field: {}", name));
            }
        }
        for action in &self.corrective_actions {
            if !action.completed && action.due_date.trim().is_empty() {
                return Err(format!(
                    "Corrective action '{}' is pending but has no due date",
                    action.id
                ));
            }
        }
        Ok(())
    }
}

/// Field a record search matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchField {
    FolioId,
    SubjectName,
}

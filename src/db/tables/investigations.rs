//! Investigation record store (insert, update-by-key, list-all, get)

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::models::{CorrectiveAction, Investigation, Signatures};
use super::super::{Database, StoreError};

const SELECT_COLUMNS: &str = "folio_id, subject_name, subject_age, area, seniority, \
     incident_date, accident_statement, corrective_actions, \
     injured_party_signature, safety_committee_signature, safety_dept_signature, \
     area_supervisor_signature, area_manager_signature";

impl Database {
    /// Insert a new record. Fails with DuplicateKey if the folio ID is taken
    /// (should not happen in normal flow since allocation is monotonic, but
    /// checked anyway).
    pub fn insert_investigation(
        &self,
        investigation: &Investigation,
    ) -> Result<Investigation, StoreError> {
        let conn = self.conn.lock().unwrap();

        let exists: bool = conn
            .query_row(
                "SELECT COUNT(*) FROM investigations WHERE folio_id = ?1",
                [&investigation.folio_id],
                |row| row.get::<_, i64>(0),
            )
            .map(|c| c > 0)?;
        if exists {
            return Err(StoreError::DuplicateKey(investigation.folio_id.clone()));
        }

        let now = Utc::now().to_rfc3339();
        let actions_json = serde_json::to_string(&investigation.corrective_actions)
            .unwrap_or_else(|_| "[]".to_string());

        conn.execute(
            "INSERT INTO investigations (folio_id, subject_name, subject_age, area, seniority,
             incident_date, accident_statement, corrective_actions,
             injured_party_signature, safety_committee_signature, safety_dept_signature,
             area_supervisor_signature, area_manager_signature, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14)",
            params![
                investigation.folio_id,
                investigation.subject_name,
                investigation.subject_age,
                investigation.area,
                investigation.seniority,
                investigation.incident_date,
                investigation.accident_statement,
                actions_json,
                investigation.signatures.injured_party,
                investigation.signatures.safety_committee_member,
                investigation.signatures.safety_dept,
                investigation.signatures.area_supervisor,
                investigation.signatures.area_manager,
                &now,
            ],
        )?;

        Ok(investigation.clone())
    }

    /// Full replace of every field of the record at `folio_id`, including
    /// explicit NULLs for cleared signatures and attachments. The folio ID
    /// itself is never reassigned.
    pub fn update_investigation(
        &self,
        folio_id: &str,
        investigation: &Investigation,
    ) -> Result<Investigation, StoreError> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();
        let actions_json = serde_json::to_string(&investigation.corrective_actions)
            .unwrap_or_else(|_| "[]".to_string());

        let rows_affected = conn.execute(
            "UPDATE investigations SET subject_name = ?1, subject_age = ?2, area = ?3,
             seniority = ?4, incident_date = ?5, accident_statement = ?6,
             corrective_actions = ?7, injured_party_signature = ?8,
             safety_committee_signature = ?9, safety_dept_signature = ?10,
             area_supervisor_signature = ?11, area_manager_signature = ?12,
             updated_at = ?13
             WHERE folio_id = ?14",
            params![
                investigation.subject_name,
                investigation.subject_age,
                investigation.area,
                investigation.seniority,
                investigation.incident_date,
                investigation.accident_statement,
                actions_json,
                investigation.signatures.injured_party,
                investigation.signatures.safety_committee_member,
                investigation.signatures.safety_dept,
                investigation.signatures.area_supervisor,
                investigation.signatures.area_manager,
                &now,
                folio_id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound(folio_id.to_string()));
        }

        Ok(Investigation {
            folio_id: folio_id.to_string(),
            ..investigation.clone()
        })
    }

    /// All records, ascending by numeric folio value. The CAST keeps the
    /// ordering correct past the 6-digit padding width.
    pub fn list_investigations(&self) -> Result<Vec<Investigation>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM investigations ORDER BY CAST(folio_id AS INTEGER) ASC",
            SELECT_COLUMNS
        ))?;

        let records = stmt
            .query_map([], |row| Self::row_to_investigation(row))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(records)
    }

    /// Get a single record by folio ID
    pub fn get_investigation(&self, folio_id: &str) -> Result<Option<Investigation>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let record = conn
            .query_row(
                &format!("SELECT {} FROM investigations WHERE folio_id = ?1", SELECT_COLUMNS),
                [folio_id],
                |row| Self::row_to_investigation(row),
            )
            .optional()?;

        Ok(record)
    }

    fn row_to_investigation(row: &rusqlite::Row) -> rusqlite::Result<Investigation> {
        let actions_json: String = row.get(7)?;
        let corrective_actions: Vec<CorrectiveAction> =
            serde_json::from_str(&actions_json).unwrap_or_default();

        Ok(Investigation {
            folio_id: row.get(0)?,
            subject_name: row.get(1)?,
            subject_age: row.get(2)?,
            area: row.get(3)?,
            seniority: row.get(4)?,
            incident_date: row.get(5)?,
            accident_statement: row.get(6)?,
            corrective_actions,
            signatures: Signatures {
                injured_party: row.get(8)?,
                safety_committee_member: row.get(9)?,
                safety_dept: row.get(10)?,
                area_supervisor: row.get(11)?,
                area_manager: row.get(12)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_db(dir: &tempfile::TempDir) -> Database {
        let db_path = dir.path().join("test.db");
        Database::new(db_path.to_str().unwrap()).expect("Failed to create database")
    }

    fn sample_record(folio_id: &str) -> Investigation {
        Investigation {
            folio_id: folio_id.to_string(),
            subject_name: "Juan Pérez".to_string(),
            subject_age: "34".to_string(),
            area: "Bodega".to_string(),
            seniority: "2 años".to_string(),
            incident_date: "2024-01-05".to_string(),
            accident_statement: "Caída en rampa de carga".to_string(),
            corrective_actions: vec![],
            signatures: Signatures::default(),
        }
    }

    #[test]
    fn insert_after_allocate_round_trip() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);

        // Burn folios until the counter hands out 000010
        let mut last = (String::new(), 0);
        for _ in 0..10 {
            last = db.allocate_next_folio().unwrap();
        }
        assert_eq!(last.0, "000010");

        db.insert_investigation(&sample_record(&last.0)).unwrap();

        let all = db.list_investigations().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].folio_id, "000010");
    }

    #[test]
    fn duplicate_insert_rejected() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);

        db.insert_investigation(&sample_record("000001")).unwrap();
        let err = db.insert_investigation(&sample_record("000001")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(folio) if folio == "000001"));
    }

    #[test]
    fn update_of_missing_record_rejected() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);

        let err = db
            .update_investigation("000099", &sample_record("000099"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(folio) if folio == "000099"));
    }

    #[test]
    fn update_replaces_not_merges() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);

        let mut record = sample_record("000005");
        record.signatures.injured_party = Some("data:image/png;base64,AAAA".to_string());
        record.signatures.area_manager = Some("data:image/png;base64,BBBB".to_string());
        db.insert_investigation(&record).unwrap();

        let mut cleared = record.clone();
        cleared.signatures = Signatures::default();
        cleared.subject_name = "Juan P. Pérez".to_string();
        db.update_investigation("000005", &cleared).unwrap();

        let stored = db.get_investigation("000005").unwrap().unwrap();
        assert_eq!(stored.subject_name, "Juan P. Pérez");
        assert!(stored.signatures.injured_party.is_none());
        assert!(stored.signatures.area_manager.is_none());
    }

    #[test]
    fn list_orders_by_numeric_folio() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);

        for folio in ["000010", "000002", "1000000", "000001"] {
            db.insert_investigation(&sample_record(folio)).unwrap();
        }

        let folios: Vec<String> = db
            .list_investigations()
            .unwrap()
            .into_iter()
            .map(|r| r.folio_id)
            .collect();
        assert_eq!(folios, vec!["000001", "000002", "000010", "1000000"]);
    }

    #[test]
    fn corrective_actions_survive_storage() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);

        let mut record = sample_record("000003");
        record.corrective_actions = vec![
            CorrectiveAction {
                id: "a1".to_string(),
                description: "Señalizar zona húmeda".to_string(),
                due_date: "2024-02-01".to_string(),
                completed: false,
                attachment: None,
            },
            CorrectiveAction {
                id: "a2".to_string(),
                description: "Capacitación de carga".to_string(),
                due_date: "".to_string(),
                completed: true,
                attachment: Some("data:image/jpeg;base64,CCCC".to_string()),
            },
        ];
        db.insert_investigation(&record).unwrap();

        let stored = db.get_investigation("000003").unwrap().unwrap();
        assert_eq!(stored.corrective_actions.len(), 2);
        assert_eq!(stored.corrective_actions[0].id, "a1");
        assert_eq!(stored.corrective_actions[0].due_date, "2024-02-01");
        assert!(stored.corrective_actions[1].completed);
        assert!(stored.corrective_actions[1].attachment.is_some());
    }
}

//! Reminder evaluation over the record snapshot.
//!
//! An incomplete corrective action surfaces when its due date falls within
//! the look-ahead window or is already past. There is no lower bound and no
//! dismissal: an overdue action keeps surfacing until it is completed.

use chrono::{Duration, NaiveDate};

use crate::models::{CorrectiveAction, Investigation};

/// Look-ahead window in days (inclusive)
pub const REMINDER_WINDOW_DAYS: i64 = 3;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Select all (record, action) pairs pending as of the given date.
///
/// Pure function of its inputs. Actions with an empty or unparseable due
/// date are silently skipped. Results are grouped by record in store order.
pub fn pending_reminders<'a>(
    records: &'a [Investigation],
    as_of: NaiveDate,
) -> Vec<(&'a Investigation, &'a CorrectiveAction)> {
    let horizon = as_of + Duration::days(REMINDER_WINDOW_DAYS);

    let mut pending = Vec::new();
    for record in records {
        for action in &record.corrective_actions {
            if action.completed {
                continue;
            }
            let due = match NaiveDate::parse_from_str(action.due_date.trim(), DATE_FORMAT) {
                Ok(date) => date,
                Err(_) => continue,
            };
            if due <= horizon {
                pending.push((record, action));
            }
        }
    }
    pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Signatures;

    fn record_with_actions(folio_id: &str, actions: Vec<CorrectiveAction>) -> Investigation {
        Investigation {
            folio_id: folio_id.to_string(),
            subject_name: "Juan Pérez".to_string(),
            subject_age: "34".to_string(),
            area: "Bodega".to_string(),
            seniority: "2 años".to_string(),
            incident_date: "2024-01-05".to_string(),
            accident_statement: "Caída en rampa de carga".to_string(),
            corrective_actions: actions,
            signatures: Signatures::default(),
        }
    }

    fn action(id: &str, due_date: &str, completed: bool) -> CorrectiveAction {
        CorrectiveAction {
            id: id.to_string(),
            description: format!("acción {}", id),
            due_date: due_date.to_string(),
            completed,
            attachment: None,
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn includes_due_dates_up_to_three_days_ahead() {
        let records = vec![record_with_actions(
            "000001",
            vec![action("in-window", "2024-01-13", false)],
        )];
        let pending = pending_reminders(&records, as_of());
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].1.id, "in-window");
    }

    #[test]
    fn excludes_due_dates_past_the_window() {
        let records = vec![record_with_actions(
            "000001",
            vec![action("too-far", "2024-01-14", false)],
        )];
        assert!(pending_reminders(&records, as_of()).is_empty());
    }

    #[test]
    fn overdue_actions_included_with_no_lower_bound() {
        let records = vec![record_with_actions(
            "000001",
            vec![action("long-overdue", "2023-12-01", false)],
        )];
        let pending = pending_reminders(&records, as_of());
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].1.id, "long-overdue");
    }

    #[test]
    fn completed_actions_excluded_regardless_of_date() {
        let records = vec![record_with_actions(
            "000001",
            vec![
                action("done-overdue", "2023-12-01", true),
                action("done-today", "2024-01-10", true),
            ],
        )];
        assert!(pending_reminders(&records, as_of()).is_empty());
    }

    #[test]
    fn blank_or_unparseable_due_dates_skipped() {
        let records = vec![record_with_actions(
            "000001",
            vec![
                action("blank", "", false),
                action("garbage", "next tuesday", false),
                action("valid", "2024-01-10", false),
            ],
        )];
        let pending = pending_reminders(&records, as_of());
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].1.id, "valid");
    }

    #[test]
    fn pairs_grouped_by_record_in_store_order() {
        let records = vec![
            record_with_actions(
                "000001",
                vec![
                    action("a1", "2024-01-09", false),
                    action("a2", "2024-01-11", false),
                ],
            ),
            record_with_actions("000002", vec![action("b1", "2024-01-10", false)]),
        ];
        let pending = pending_reminders(&records, as_of());
        let ids: Vec<&str> = pending.iter().map(|(_, a)| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2", "b1"]);
        assert_eq!(pending[0].0.folio_id, "000001");
        assert_eq!(pending[2].0.folio_id, "000002");
    }
}

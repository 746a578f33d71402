//! Investigation record endpoints: list, save (insert/update), search,
//! pending reminders, and CSV export.
//!
//! Every failure collapses to a 500 with `{ "error": ... }`; the form treats
//! them all as a generic save-failed indication.

use actix_web::{web, HttpResponse, Responder};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CorrectiveAction, Investigation, SearchField};
use crate::{export, reminders, search, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequest {
    investigacion: Investigation,
    #[serde(default)]
    is_update: bool,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    term: String,
    field: SearchField,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemindersQuery {
    as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct ReminderEntry {
    investigacion: Investigation,
    accion: CorrectiveAction,
}

/// GET /investigaciones — every stored record, ascending folio order
async fn list_investigations(data: web::Data<AppState>) -> impl Responder {
    match data.db.list_investigations() {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => {
            log::error!("Error fetching investigations: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch data"
            }))
        }
    }
}

/// POST /investigaciones — insert a new record or fully replace an
/// existing one, keyed by the record's folio ID
async fn save_investigation(
    data: web::Data<AppState>,
    body: web::Json<SaveRequest>,
) -> impl Responder {
    let SaveRequest {
        investigacion,
        is_update,
    } = body.into_inner();

    if let Err(reason) = investigacion.validate() {
        log::warn!("Rejected malformed investigation: {}", reason);
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": reason
        }));
    }

    let result = if is_update {
        data.db
            .update_investigation(&investigacion.folio_id, &investigacion)
    } else {
        data.db.insert_investigation(&investigacion)
    };

    match result {
        Ok(saved) => HttpResponse::Ok().json(saved),
        Err(e) => {
            log::error!("Error saving investigation: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to save data"
            }))
        }
    }
}

/// GET /investigaciones/{folioId} — single record lookup
async fn get_investigation(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let folio_id = path.into_inner();
    match data.db.get_investigation(&folio_id) {
        Ok(Some(record)) => HttpResponse::Ok().json(record),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("No investigation with folio {}", folio_id)
        })),
        Err(e) => {
            log::error!("Error fetching investigation {}: {}", folio_id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch data"
            }))
        }
    }
}

/// GET /investigaciones/search?term=...&field=folioId|subjectName
async fn search_investigations(
    data: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    match data.db.list_investigations() {
        Ok(records) => {
            let matches: Vec<Investigation> = search::search(&records, &query.term, query.field)
                .into_iter()
                .cloned()
                .collect();
            HttpResponse::Ok().json(matches)
        }
        Err(e) => {
            log::error!("Error searching investigations: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch data"
            }))
        }
    }
}

/// GET /investigaciones/reminders[?asOf=YYYY-MM-DD] — incomplete actions
/// due within the window or overdue; asOf defaults to today (UTC)
async fn pending_reminders(
    data: web::Data<AppState>,
    query: web::Query<RemindersQuery>,
) -> impl Responder {
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());

    match data.db.list_investigations() {
        Ok(records) => {
            let entries: Vec<ReminderEntry> = reminders::pending_reminders(&records, as_of)
                .into_iter()
                .map(|(record, action)| ReminderEntry {
                    investigacion: record.clone(),
                    accion: action.clone(),
                })
                .collect();
            HttpResponse::Ok().json(entries)
        }
        Err(e) => {
            log::error!("Error evaluating reminders: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch data"
            }))
        }
    }
}

/// GET /investigaciones/export — the whole record set as one CSV document
async fn export_csv(data: web::Data<AppState>) -> impl Responder {
    match data.db.list_investigations() {
        Ok(records) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(export::export_all_csv(&records)),
        Err(e) => {
            log::error!("Error exporting investigations: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch data"
            }))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/investigaciones")
            .route("", web::get().to(list_investigations))
            .route("", web::post().to(save_investigation))
            .route("/search", web::get().to(search_investigations))
            .route("/reminders", web::get().to(pending_reminders))
            .route("/export", web::get().to(export_csv))
            // Literal routes above must register before the catch-all key lookup
            .route("/{folioId}", web::get().to(get_investigation)),
    );
}

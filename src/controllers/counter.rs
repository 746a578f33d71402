//! Folio counter endpoints.
//!
//! GET peeks at the next folio without burning it (the form shows it as a
//! preview); POST allocates for real and must only be called on a confirmed
//! save of a new record.

use actix_web::{web, HttpResponse, Responder};

use crate::AppState;

/// GET /counter — next folio ID without mutating the sequence
async fn peek_counter(data: web::Data<AppState>) -> impl Responder {
    let (next_id, last_issued) = data.db.peek_next_folio();
    HttpResponse::Ok().json(serde_json::json!({
        "nextId": next_id,
        "counter": last_issued
    }))
}

/// POST /counter — atomically issue the next folio ID
async fn allocate_counter(data: web::Data<AppState>) -> impl Responder {
    match data.db.allocate_next_folio() {
        Ok((id, issued)) => HttpResponse::Ok().json(serde_json::json!({
            "id": id,
            "counter": issued
        })),
        Err(e) => {
            log::error!("Error incrementing folio counter: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to increment counter"
            }))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/counter")
            .route(web::get().to(peek_counter))
            .route(web::post().to(allocate_counter)),
    );
}

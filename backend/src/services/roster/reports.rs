use actix_web::{web, HttpResponse, Responder};

use crate::config::Config;
use crate::storage::files::{self, Area};

/// Serves a generated annotated report by name.
pub(crate) async fn process(cfg: web::Data<Config>, name: web::Path<String>) -> impl Responder {
    let name = name.into_inner();
    if !files::exists(&cfg, Area::Reports, &name) {
        return HttpResponse::NotFound().body("Report not found");
    }
    match files::read(&cfg, Area::Reports, &name) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", name),
            ))
            .body(bytes),
        Err(e) => HttpResponse::InternalServerError().body(format!("Error: {}", e)),
    }
}

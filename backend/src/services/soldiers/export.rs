use actix_web::{web, HttpResponse, Responder};
use common::model::soldier::Candidate;

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::roster::sheet;
use crate::storage;

/// Renders every stored soldier as a six-column spreadsheet (the stored →
/// tabular conversion).
pub(crate) async fn process(cfg: web::Data<Config>) -> impl Responder {
    let result = web::block(move || -> Result<Vec<u8>> {
        let conn = storage::open(&cfg.db_path).map_err(PipelineError::Store)?;
        let soldiers = storage::all_soldiers(&conn).map_err(PipelineError::Store)?;
        let rows: Vec<Candidate> = soldiers.iter().map(|s| Candidate::from(&s.soldier)).collect();
        sheet::write_sheet(&rows)
    })
    .await;

    match result {
        Ok(Ok(bytes)) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"soldiers.csv\""))
            .body(bytes),
        Ok(Err(e)) => HttpResponse::InternalServerError().body(format!("Error: {}", e)),
        Err(e) => HttpResponse::InternalServerError().body(format!("Task join error: {}", e)),
    }
}

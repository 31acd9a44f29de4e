use actix_web::{web, HttpResponse, Responder};
use common::requests::LogQuery;

use crate::config::Config;
use crate::storage;

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

pub(crate) async fn process(
    cfg: web::Data<Config>,
    query: web::Query<LogQuery>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let result = web::block(move || -> rusqlite::Result<_> {
        let conn = storage::open(&cfg.db_path)?;
        storage::recent_logs(&conn, limit)
    })
    .await;

    match result {
        Ok(Ok(entries)) => HttpResponse::Ok().json(entries),
        Ok(Err(e)) => HttpResponse::InternalServerError().body(format!("Error: {}", e)),
        Err(e) => HttpResponse::InternalServerError().body(format!("Task join error: {}", e)),
    }
}

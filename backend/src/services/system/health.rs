use actix_web::{web, HttpResponse, Responder};

use crate::config::Config;
use crate::storage;

pub(crate) async fn process(cfg: web::Data<Config>) -> impl Responder {
    let result = web::block(move || storage::health_check(&cfg.db_path)).await;

    match result {
        Ok(Ok(())) => HttpResponse::Ok().json(serde_json::json!({ "store": "reachable" })),
        Ok(Err(e)) => {
            HttpResponse::ServiceUnavailable().body(format!("Store unreachable: {}", e))
        }
        Err(e) => HttpResponse::InternalServerError().body(format!("Task join error: {}", e)),
    }
}

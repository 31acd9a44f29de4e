use actix_web::{web, HttpResponse, Responder};
use common::requests::{AreaSummary, SummaryResponse};

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::storage;
use crate::storage::files::{self, Area};

pub(crate) async fn process(cfg: web::Data<Config>) -> impl Responder {
    let result = web::block(move || -> Result<SummaryResponse> {
        let mut areas = Vec::with_capacity(Area::ALL.len());
        for area in Area::ALL {
            let names = files::list(&cfg, area)?;
            areas.push(AreaSummary {
                area: area.dir_name().to_string(),
                count: names.len(),
                files: names,
            });
        }

        let conn = storage::open(&cfg.db_path).map_err(PipelineError::Store)?;
        Ok(SummaryResponse {
            areas,
            soldiers: storage::count_soldiers(&conn).map_err(PipelineError::Store)?,
            log_entries: storage::count_logs(&conn).map_err(PipelineError::Store)?,
        })
    })
    .await;

    match result {
        Ok(Ok(summary)) => HttpResponse::Ok().json(summary),
        Ok(Err(e)) => HttpResponse::InternalServerError().body(format!("Error: {}", e)),
        Err(e) => HttpResponse::InternalServerError().body(format!("Task join error: {}", e)),
    }
}

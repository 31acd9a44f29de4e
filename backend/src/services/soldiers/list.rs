use actix_web::{web, HttpResponse, Responder};
use common::model::soldier::SoldierStatus;
use common::requests::{SoldierListQuery, SoldierPage};

use crate::config::Config;
use crate::storage::{self, SoldierFilter};

const DEFAULT_PAGE_SIZE: u32 = 25;
const MAX_PAGE_SIZE: u32 = 200;

pub(crate) async fn process(
    cfg: web::Data<Config>,
    query: web::Query<SoldierListQuery>,
) -> impl Responder {
    let query = query.into_inner();

    let status = match query.status.as_deref() {
        Some(text) => match SoldierStatus::parse(text) {
            Some(status) => Some(status),
            None => {
                return HttpResponse::BadRequest().body(format!("Unknown status: {}", text))
            }
        },
        None => None,
    };

    let page = query.page.unwrap_or(1).max(1);
    let page_size = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let filter = SoldierFilter {
        status,
        unit: query.unit,
        page,
        page_size,
    };

    let result = web::block(move || -> rusqlite::Result<_> {
        let conn = storage::open(&cfg.db_path)?;
        storage::list_soldiers(&conn, &filter)
    })
    .await;

    match result {
        Ok(Ok((soldiers, total))) => HttpResponse::Ok().json(SoldierPage {
            soldiers,
            total,
            page,
            page_size,
        }),
        Ok(Err(e)) => HttpResponse::InternalServerError().body(format!("Error: {}", e)),
        Err(e) => HttpResponse::InternalServerError().body(format!("Task join error: {}", e)),
    }
}

//! Operational endpoints.
//!
//! - `GET /api/system/summary`: holding-area contents plus aggregate store
//!   counts.
//! - `GET /api/system/health`: on-demand store connectivity probe; nothing
//!   is cached between calls.

use actix_web::web::{get, scope};
use actix_web::Scope;

mod health;
mod summary;

const API_PATH: &str = "/api/system";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/summary", get().to(summary::process))
        .route("/health", get().to(health::process))
}

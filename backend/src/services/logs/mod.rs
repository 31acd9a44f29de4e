//! Processing-ledger endpoints.
//!
//! - `GET /api/logs`: recent ledger entries, newest first, bounded by the
//!   `limit` query parameter.

use actix_web::web::{get, scope};
use actix_web::Scope;

mod recent;

const API_PATH: &str = "/api/logs";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(recent::process))
}

//! Stored-record query endpoints.
//!
//! - `GET /api/soldiers`: filtered, paginated listing (exact status,
//!   case-insensitive unit substring) plus the total matching count.
//! - `GET /api/soldiers/export`: the whole store rendered as a six-column
//!   spreadsheet.

use actix_web::web::{get, scope};
use actix_web::Scope;

mod export;
mod list;

const API_PATH: &str = "/api/soldiers";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/export", get().to(export::process))
}

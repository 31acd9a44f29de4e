//! Roster submission endpoints.
//!
//! - `POST /api/roster/upload`: multipart upload of an XML roster. The file
//!   runs through the conversion pipeline and the verdict summary comes back
//!   in the response; rejected uploads name the annotated report.
//! - `POST /api/roster/reupload`: multipart upload of a corrected
//!   spreadsheet, re-entering the same pipeline so the fix/re-validate loop
//!   uses identical semantics.
//! - `GET /api/roster/reports/{name}`: downloads a previously generated
//!   annotated report from the reports area.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod reports;
mod reupload;
mod upload;

const API_PATH: &str = "/api/roster";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/upload", post().to(upload::process))
        .route("/reupload", post().to(reupload::process))
        .route("/reports/{name}", get().to(reports::process))
}

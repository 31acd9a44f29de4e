use actix_multipart::Multipart;
use actix_web::{web, Responder};

use crate::config::Config;
use crate::roster::pipeline::InputKind;

/// HTTP handler for corrected spreadsheet re-uploads. Same pipeline as the
/// XML upload, starting from the tabular form.
pub(crate) async fn process(cfg: web::Data<Config>, payload: Multipart) -> impl Responder {
    super::upload::run(cfg, payload, ".csv", InputKind::Sheet).await
}

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::StreamExt;

use crate::config::Config;
use crate::roster::pipeline::{self, InputKind};

/// HTTP handler for XML roster uploads.
pub(crate) async fn process(cfg: web::Data<Config>, payload: Multipart) -> impl Responder {
    run(cfg, payload, ".xml", InputKind::Xml).await
}

/// Shared upload flow: pull the file part out of the multipart stream, then
/// run the pipeline on the blocking pool and report the verdict.
pub(super) async fn run(
    cfg: web::Data<Config>,
    mut payload: Multipart,
    extension: &str,
    kind: InputKind,
) -> HttpResponse {
    let (filename, bytes) = match read_file_part(&mut payload, extension).await {
        Ok(part) => part,
        Err(e) => return HttpResponse::BadRequest().body(format!("Error: {}", e)),
    };

    let result =
        web::block(move || pipeline::process_file(cfg.get_ref(), &filename, &bytes, kind)).await;

    match result {
        Ok(Ok(response)) => HttpResponse::Ok().json(response),
        Ok(Err(e)) => HttpResponse::InternalServerError().body(format!("Error: {}", e)),
        Err(e) => HttpResponse::InternalServerError().body(format!("Task join error: {}", e)),
    }
}

/// Streams the `file` part of a multipart payload into memory, checking the
/// declared extension first.
async fn read_file_part(
    payload: &mut Multipart,
    extension: &str,
) -> Result<(String, Vec<u8>), String> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| e.to_string())?;
        let part_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if part_name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if !filename.to_lowercase().ends_with(extension) {
            return Err(format!("The file must end with {}", extension));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            bytes.extend_from_slice(&chunk.map_err(|e| e.to_string())?);
        }
        return Ok((filename, bytes));
    }

    Err("Missing file".to_string())
}

mod config;
mod error;
mod roster;
mod services;
mod storage;

use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let cfg = config::Config::from_env();

    storage::files::ensure_areas(&cfg)?;
    let conn = storage::open(&cfg.db_path)
        .and_then(|conn| storage::init_schema(&conn).map(|_| conn))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    drop(conn);

    let bind = (cfg.host.clone(), cfg.port);
    info!("Server running at http://{}:{}", cfg.host, cfg.port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(web::Data::new(cfg.clone()))
            .service(services::roster::configure_routes())
            .service(services::soldiers::configure_routes())
            .service(services::logs::configure_routes())
            .service(services::system::configure_routes())
    })
    .bind(bind)?
    .run()
    .await
}

//! Runtime settings, read once from the environment at startup.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path of the SQLite database file.
    pub db_path: PathBuf,
    /// Root directory holding the four file areas.
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let host = env::var("ROSTERIFY_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("ROSTERIFY_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let db_path = env::var("ROSTERIFY_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("rosterify.sqlite"));
        let data_dir = env::var("ROSTERIFY_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        Config {
            host,
            port,
            db_path,
            data_dir,
        }
    }
}

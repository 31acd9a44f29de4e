//! The four named holding areas on disk. A file rests in exactly one area
//! at a time; moves between areas are atomic renames.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{PipelineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    /// Transient resting place for raw incoming files.
    Uploads,
    /// Sources that passed validation (originals and corrections).
    Validated,
    /// Sources that were rejected.
    Invalid,
    /// Generated annotated reports.
    Reports,
}

impl Area {
    pub const ALL: [Area; 4] = [Area::Uploads, Area::Validated, Area::Invalid, Area::Reports];

    pub fn dir_name(&self) -> &'static str {
        match self {
            Area::Uploads => "uploads",
            Area::Validated => "validated",
            Area::Invalid => "invalid",
            Area::Reports => "reports",
        }
    }
}

pub fn area_path(cfg: &Config, area: Area) -> PathBuf {
    cfg.data_dir.join(area.dir_name())
}

pub fn ensure_areas(cfg: &Config) -> std::io::Result<()> {
    for area in Area::ALL {
        fs::create_dir_all(area_path(cfg, area))?;
    }
    Ok(())
}

/// Rejects names that could escape an area directory.
pub fn checked_name(name: &str) -> Result<&str> {
    if name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || name.starts_with('.')
    {
        return Err(PipelineError::BadName(name.to_string()));
    }
    Ok(name)
}

/// Durable write: the file is flushed and synced before this returns.
pub fn write(cfg: &Config, area: Area, name: &str, bytes: &[u8]) -> Result<()> {
    let path = area_path(cfg, area).join(checked_name(name)?);
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

pub fn move_between(cfg: &Config, from: Area, to: Area, name: &str) -> Result<()> {
    let name = checked_name(name)?;
    fs::rename(
        area_path(cfg, from).join(name),
        area_path(cfg, to).join(name),
    )?;
    Ok(())
}

pub fn exists(cfg: &Config, area: Area, name: &str) -> bool {
    match checked_name(name) {
        Ok(name) => area_path(cfg, area).join(name).is_file(),
        Err(_) => false,
    }
}

pub fn read(cfg: &Config, area: Area, name: &str) -> Result<Vec<u8>> {
    let path = area_path(cfg, area).join(checked_name(name)?);
    Ok(fs::read(path)?)
}

/// File names in one area, sorted for stable output.
pub fn list(cfg: &Config, area: Area) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(area_path(cfg, area))? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(dir: &std::path::Path) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            db_path: dir.join("test.sqlite"),
            data_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn moves_are_renames_between_areas() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = test_config(dir.path());
        ensure_areas(&cfg).unwrap();

        write(&cfg, Area::Uploads, "batch.xml", b"<roster/>").unwrap();
        move_between(&cfg, Area::Uploads, Area::Invalid, "batch.xml").unwrap();

        assert!(!exists(&cfg, Area::Uploads, "batch.xml"));
        assert!(exists(&cfg, Area::Invalid, "batch.xml"));
        assert_eq!(read(&cfg, Area::Invalid, "batch.xml").unwrap(), b"<roster/>");
    }

    #[test]
    fn listing_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = test_config(dir.path());
        ensure_areas(&cfg).unwrap();

        write(&cfg, Area::Reports, "b.csv", b"b").unwrap();
        write(&cfg, Area::Reports, "a.csv", b"a").unwrap();
        assert_eq!(list(&cfg, Area::Reports).unwrap(), vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn traversal_names_are_rejected() {
        assert!(checked_name("../etc/passwd").is_err());
        assert!(checked_name("a/b.csv").is_err());
        assert!(checked_name(".hidden").is_err());
        assert!(checked_name("report_1.csv").is_ok());
    }
}

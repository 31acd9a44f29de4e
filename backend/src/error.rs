use thiserror::Error;

/// Infrastructure failures of a pipeline run.
///
/// Schema violations are not errors; they are data carried in the verdict.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report error: {0}")]
    Report(#[from] csv::Error),

    #[error("invalid file name: {0}")]
    BadName(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

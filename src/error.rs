use thiserror::Error;

/// Rejected clustering parameters
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParamError {
    #[error("cluster radius must be a finite number of meters, got {0}")]
    Radius(f64),
    #[error("overlap threshold must be a finite fraction, got {0}")]
    Overlap(f64),
}

/// Failure to read survey data or write cluster output
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),
    #[error("no tree observations with valid coordinates")]
    Empty,
}

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::LedgerError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    #[error("Invalid {field}: '{value}' (expected {expected})")]
    InvalidEnum {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("failed to write {}: {source}", path.display())]
    ExportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// True for errors the session reports and then carries on from.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::Io(_))
    }
}

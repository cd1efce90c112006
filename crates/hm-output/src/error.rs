//! Error types for hm-output.

use thiserror::Error;

/// A trace backend failed to write.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("trace I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("trace CSV failed: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("trace database failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;

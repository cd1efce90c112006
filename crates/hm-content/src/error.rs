use hm_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{table}: {reason}")]
    Parse { table: &'static str, reason: String },

    #[error("dangling reference to {what} {id:?}")]
    DanglingReference { what: &'static str, id: String },

    #[error("{what} id {id:?} contains the composite id delimiter '_'")]
    UnsafeId { what: &'static str, id: String },
}

pub type ContentResult<T> = Result<T, ContentError>;

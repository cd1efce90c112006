//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors produced while decoding identifiers or validating core values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("malformed {what} id {raw:?}: {reason}")]
    MalformedId {
        what:   &'static str,
        raw:    String,
        reason: &'static str,
    },

    #[error("unknown {what} code {code:?}")]
    UnknownCode { what: &'static str, code: String },
}

/// Shorthand result type for `hm-core`.
pub type CoreResult<T> = Result<T, CoreError>;

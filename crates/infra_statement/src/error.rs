//! Statement error types
//!
//! Errors raised while reading a statement document. They are all fatal to
//! the load: a statement that cannot be decoded has no partial meaning.
//! Per-record date problems are not errors here; the raw date is passed on
//! and judged by the portfolio domain.

use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

use core_kernel::IdentifierError;

/// Errors that can occur while loading a statement
#[derive(Debug, Error)]
pub enum StatementError {
    /// The statement file could not be read
    #[error("Failed to read statement '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not have the expected shape
    #[error("Malformed statement document: {0}")]
    Json(#[from] serde_json::Error),

    /// The `data` array is empty
    #[error("Statement contains no data sections")]
    EmptyDocument,

    /// A required field is absent or null
    #[error("{section}[{index}]: missing field '{field}'")]
    MissingField {
        section: &'static str,
        index: usize,
        field: &'static str,
    },

    /// A numeric field could not be read as a decimal
    #[error("{section}[{index}]: field '{field}' is not a number: '{value}'")]
    InvalidNumber {
        section: &'static str,
        index: usize,
        field: &'static str,
        value: String,
    },

    /// ISIN or folio is blank
    #[error("{section}[{index}]: {source}")]
    InvalidIdentifier {
        section: &'static str,
        index: usize,
        #[source]
        source: IdentifierError,
    },

    /// A snapshot entry carries a negative NAV
    #[error("dtSummary[{index}]: NAV must not be negative, got {nav}")]
    InvalidNav { index: usize, nav: Decimal },
}

impl StatementError {
    /// Checks if this error comes from the file system rather than the content
    pub fn is_io(&self) -> bool {
        matches!(self, StatementError::Io { .. })
    }
}

//! Structured error types for the druglike workspace.

use thiserror::Error;

/// Unified error type for all druglike operations.
#[derive(Debug, Error)]
pub enum DruglikeError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (malformed SMILES, CSV, or API payload)
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An uploaded table lacks one or more required columns.
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Remote lookup failed (transport error, bad status, undecodable body)
    #[error("lookup error: {0}")]
    Lookup(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("configuration error: {0}")]
    Config(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the druglike workspace.
pub type Result<T> = std::result::Result<T, DruglikeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_lists_every_name() {
        let err = DruglikeError::MissingColumns(vec!["Name".into(), "SMILES".into()]);
        assert_eq!(err.to_string(), "missing required column(s): Name, SMILES");
    }

    #[test]
    fn io_converts_with_question_mark() {
        fn open() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(open(), Err(DruglikeError::Io(_))));
    }
}

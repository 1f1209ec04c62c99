//! Error types for the life simulator

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the life simulator
#[derive(Error, Debug)]
pub enum LyfSimError {
    /// A table references a label that a dependent table does not define
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// A single table violates its own invariants
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("Malformed income data at line {line}: {reason}")]
    MalformedIncomeData { line: usize, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Batch size {0} is outside 1..=100")]
    InvalidBatchSize(usize),
}

impl LyfSimError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LyfSimError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for faults in the static table data, as opposed to I/O or caller input
    pub fn is_data_fault(&self) -> bool {
        matches!(
            self,
            LyfSimError::DataIntegrity(_)
                | LyfSimError::InvalidTable(_)
                | LyfSimError::MalformedIncomeData { .. }
                | LyfSimError::DeserializationError(_)
        )
    }
}

impl From<serde_json::Error> for LyfSimError {
    fn from(err: serde_json::Error) -> Self {
        LyfSimError::DeserializationError(err.to_string())
    }
}

/// Result type alias for the life simulator
pub type Result<T> = std::result::Result<T, LyfSimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_faults() {
        assert!(LyfSimError::DataIntegrity("x".into()).is_data_fault());
        assert!(LyfSimError::MalformedIncomeData {
            line: 3,
            reason: "bad amount".into()
        }
        .is_data_fault());
        assert!(!LyfSimError::InvalidBatchSize(0).is_data_fault());
    }

    #[test]
    fn test_io_error_names_path() {
        let err = LyfSimError::io(
            "data/occupation_income.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(
            err.to_string(),
            "I/O error on data/occupation_income.csv: missing"
        );
    }
}

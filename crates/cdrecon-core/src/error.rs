use crate::domain::SourceRole;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("{role} is missing required column `{column}`")]
    MissingColumn {
        role: SourceRole,
        column: &'static str,
    },
    #[error("{role} has more than one column named `{column}`")]
    DuplicateColumn {
        role: SourceRole,
        column: &'static str,
    },
    #[error("row {row}: expected {expected} cells, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{role} row {row}: duration `{value}` is not numeric")]
    InvalidDuration {
        role: SourceRole,
        row: usize,
        value: String,
    },
    #[error("invalid {name} tolerance: {value}")]
    InvalidTolerance { name: &'static str, value: f64 },
}

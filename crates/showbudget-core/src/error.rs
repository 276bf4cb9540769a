use thiserror::Error;

use showbudget_domain::{StoreError, StructureError};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Nothing to import: snapshot contains no readable lines")]
    EmptySnapshot,
    #[error("Reconciliation ordering violated: {0}")]
    OrderingViolation(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Snapshot not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Single-line status text for the presentation layer.
    pub fn status_message(&self) -> String {
        match self {
            CoreError::EmptySnapshot => "Nothing to import.".into(),
            CoreError::NotFound(id) => format!("Budget `{id}` was not found."),
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::InvalidOperation(err.to_string())
    }
}

impl From<StructureError> for CoreError {
    fn from(err: StructureError) -> Self {
        CoreError::OrderingViolation(err.to_string())
    }
}

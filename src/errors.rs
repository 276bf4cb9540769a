use std::result::Result as StdResult;

use showbudget_config::ConfigError;
use showbudget_core::CoreError;
use thiserror::Error;

/// Unified error type for the budget, storage and configuration layers.
#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Nothing to import")]
    EmptySnapshot,
    #[error("Budget not found: {0}")]
    SnapshotNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Reconciliation failed: {0}")]
    Reconciliation(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, BudgetError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<CoreError> for BudgetError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptySnapshot => BudgetError::EmptySnapshot,
            CoreError::NotFound(id) => BudgetError::SnapshotNotFound(id),
            CoreError::OrderingViolation(message) => BudgetError::Reconciliation(message),
            CoreError::InvalidOperation(message) | CoreError::Validation(message) => {
                BudgetError::InvalidInput(message)
            }
            CoreError::Storage(message) | CoreError::Serde(message) => {
                BudgetError::StorageError(message)
            }
            CoreError::Io(err) => BudgetError::StorageError(err.to_string()),
        }
    }
}

impl From<ConfigError> for BudgetError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => BudgetError::StorageError(io.to_string()),
            other => BudgetError::ConfigError(other.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(BudgetError::from(err))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::from(BudgetError::from(err))
    }
}

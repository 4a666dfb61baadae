//! Error types for the logic core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown operator token: {0}")]
    UnknownOperatorToken(String),

    #[error("Unknown operator name: {0}")]
    UnknownOperatorName(String),

    #[error("Unknown join operator: {0}")]
    UnknownJoinOperator(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

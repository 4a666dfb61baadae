//! SDK error types

use thiserror::Error;
use xlform_compiler::CompileError;
use xlform_parser::ParseError;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Parser error
    #[error("Parser error: {0}")]
    ParseError(#[from] ParseError),

    /// Compiler error other than a parse failure
    #[error("Compiler error: {0}")]
    CompileError(CompileError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<CompileError> for SdkError {
    fn from(error: CompileError) -> Self {
        match error {
            CompileError::Parse(e) => SdkError::ParseError(e),
            other => SdkError::CompileError(other),
        }
    }
}

impl SdkError {
    /// The parse error, when the failure was a rejected expression
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            SdkError::ParseError(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

//! Compiler error types

use thiserror::Error;
use xlform_parser::ParseError;

/// Compiler error
#[derive(Error, Debug)]
pub enum CompileError {
    /// Expression could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Serialized expression parses to different criteria
    #[error("Round trip changed expression: '{original}' was written as '{serialized}'")]
    RoundTripMismatch { original: String, serialized: String },

    /// Criterion references a question missing from the form
    #[error("Undefined field '{field}' referenced by '{question}'")]
    UndefinedField { field: String, question: String },
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;

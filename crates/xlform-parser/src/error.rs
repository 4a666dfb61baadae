//! Parser error types

use thiserror::Error;
use xlform_core::CoreError;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// A clause matched none of the supported criterion shapes
    #[error("criterion not recognized: '{clause}'")]
    UnrecognizedClause { clause: String },

    /// `and` and `or` both used at the top level
    #[error("mixed join operators not supported: '{first}' and '{second}'")]
    MixedJoinOperators { first: String, second: String },

    /// Blank input
    #[error("Empty expression")]
    EmptyExpression,

    /// Operator table lookup failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Grammar pattern failed to compile
    #[error("Invalid grammar pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Form definition is structurally unusable
    #[error("Invalid form definition: {0}")]
    InvalidForm(String),
}

impl ParseError {
    pub(crate) fn unrecognized(clause: impl Into<String>) -> Self {
        ParseError::UnrecognizedClause {
            clause: clause.into(),
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

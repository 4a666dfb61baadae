//! XLSForm logic SDK
//!
//! High-level API for turning `relevant` and `constraint` expressions into
//! rule-builder criteria and back, and for validating whole forms.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;

// Re-export main types
pub use builder::LogicEngineBuilder;
pub use config::EngineConfig;
pub use engine::LogicEngine;
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use xlform_compiler::{Diagnostic, DiagnosticSeverity, ValidationOptions, ValidationResult};
pub use xlform_core::{
    CriteriaExpression, Criterion, CriterionOperator, FieldReference, FormDefinition,
    JoinOperator, LogicColumn, SurveyRow,
};

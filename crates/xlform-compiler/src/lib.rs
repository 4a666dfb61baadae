//! XLSForm logic compiler - criteria back to expression strings
//!
//! This crate writes [`CriteriaExpression`](xlform_core::CriteriaExpression)
//! values back into XLSForm syntax, checks round trips, and validates every
//! logic column of a form.

pub mod codegen;
pub mod compiler;
pub mod error;
pub mod semantic;
pub mod validator;

// Re-export main types
pub use codegen::ExpressionSerializer;
pub use compiler::LogicCompiler;
pub use error::{CompileError, Result};
pub use semantic::ReferenceChecker;
pub use validator::{
    CompiledLogic, Diagnostic, DiagnosticSeverity, FormMetadata, FormValidator,
    ValidationOptions, ValidationResult,
};

//! XLSForm logic core - data model shared by the parser and serializer
//!
//! This crate provides the types every other crate in the workspace speaks:
//! - Field references and the surface syntaxes that name them
//! - The closed criterion operator table
//! - Criteria and criteria expressions produced by the parser
//! - Survey sheet rows whose logic columns get compiled
//! - Error types

pub mod criteria;
pub mod error;
pub mod field;
pub mod form;
pub mod operator;

// Re-export commonly used types
pub use criteria::{CriteriaExpression, Criterion, JoinOperator};
pub use error::{CoreError, Result};
pub use field::{FieldReference, FieldReferenceSyntax};
pub use form::{FormDefinition, LogicColumn, SurveyRow};
pub use operator::{CriterionKind, CriterionOperator};

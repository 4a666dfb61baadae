//! XLSForm logic parser - expression strings to criteria
//!
//! This crate turns `relevant` and `constraint` expressions into
//! [`CriteriaExpression`](xlform_core::CriteriaExpression) values, and loads
//! survey sheets whose logic columns need compiling.

pub mod error;
pub mod extractor;
pub mod form_parser;
pub mod grammar;
pub mod logic_parser;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use extractor::CriterionExtractor;
pub use form_parser::FormParser;
pub use grammar::Grammar;
pub use logic_parser::LogicParser;

//! Code generation from criteria back to expression text

mod expression_codegen;

pub use expression_codegen::ExpressionSerializer;

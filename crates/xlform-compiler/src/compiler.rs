//! Parser and serializer paired for one reference syntax

use crate::codegen::ExpressionSerializer;
use crate::error::{CompileError, Result};
use xlform_core::{CriteriaExpression, FieldReferenceSyntax};
use xlform_parser::LogicParser;

/// Two-way compiler between expression text and criteria
#[derive(Debug, Clone)]
pub struct LogicCompiler {
    parser: LogicParser,
    serializer: ExpressionSerializer,
}

impl LogicCompiler {
    pub fn new(syntax: FieldReferenceSyntax) -> Result<Self> {
        let parser = LogicParser::new(syntax.clone())?;
        Ok(Self {
            parser,
            serializer: ExpressionSerializer::new(syntax),
        })
    }

    /// Compiler for `relevant` expressions
    pub fn relevant() -> Result<Self> {
        Self::new(FieldReferenceSyntax::Bare)
    }

    /// Compiler for `constraint` expressions, not yet bound to a question
    ///
    /// Use [`LogicCompiler::for_question`] before compiling anything that
    /// uses `.`.
    pub fn constraint() -> Result<Self> {
        Self::new(FieldReferenceSyntax::contextual(""))
    }

    /// Rebind `.` to `current`, sharing the compiled grammar
    pub fn for_question(&self, current: impl Into<String>) -> Self {
        let parser = self.parser.for_question(current);
        let serializer = ExpressionSerializer::new(parser.syntax().clone());
        Self { parser, serializer }
    }

    pub fn syntax(&self) -> &FieldReferenceSyntax {
        self.parser.syntax()
    }

    /// Expression text to criteria
    pub fn compile(&self, text: &str) -> Result<CriteriaExpression> {
        Ok(self.parser.compile(text)?)
    }

    /// Criteria to expression text; never fails
    pub fn to_expression(&self, expr: &CriteriaExpression) -> String {
        self.serializer.serialize(expr)
    }

    /// Compile then serialize, giving the canonical spelling of `text`
    pub fn normalize(&self, text: &str) -> Result<String> {
        let expr = self.compile(text)?;
        Ok(self.to_expression(&expr))
    }

    /// Compile `text` and check the serialized form compiles to the same criteria
    pub fn verify_round_trip(&self, text: &str) -> Result<CriteriaExpression> {
        let expr = self.compile(text)?;
        let serialized = self.to_expression(&expr);

        let reparsed = self.compile(&serialized)?;
        if reparsed != expr {
            log::debug!("Round trip mismatch: '{}' -> '{}'", text, serialized);
            return Err(CompileError::RoundTripMismatch {
                original: text.to_string(),
                serialized,
            });
        }

        Ok(expr)
    }
}

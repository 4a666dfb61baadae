//! Form validator - checks every logic column of a form
//!
//! Compiles each `relevant` and `constraint` expression of the survey sheet
//! and reports problems as diagnostics instead of stopping at the first one,
//! which suits an editor that highlights every broken row at once.
//!
//! # Example
//!
//! ```rust
//! use xlform_compiler::FormValidator;
//! use xlform_core::{FormDefinition, SurveyRow};
//!
//! let form = FormDefinition::new(vec![
//!     SurveyRow::new("integer", "age").with_constraint(". >= 0"),
//!     SurveyRow::new("text", "job").with_relevant("${age} >= 16"),
//! ]);
//!
//! let result = FormValidator::new().unwrap().validate(&form);
//! assert!(result.valid);
//! assert_eq!(result.compiled.len(), 2);
//! ```

use crate::compiler::LogicCompiler;
use crate::error::{CompileError, Result};
use crate::semantic::ReferenceChecker;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use xlform_core::{CriteriaExpression, FormDefinition, LogicColumn};

/// Which checks the validator runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Report criteria that read questions missing from the form
    pub check_references: bool,

    /// Report question names used by more than one row
    pub check_duplicate_names: bool,

    /// Re-serialize each expression and check it compiles back identically
    pub verify_round_trip: bool,

    /// Stop at the first error
    pub fail_fast: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_references: true,
            check_duplicate_names: true,
            verify_round_trip: true,
            fail_fast: false,
        }
    }
}

/// Severity level for validation diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A single diagnostic message from validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,

    /// Error/warning code (e.g., "E001", "W001")
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Survey row number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,

    /// Question name of the row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,

    /// Logic column the expression came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<LogicColumn>,

    /// The offending expression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Error, code, message)
    }

    /// Create a new warning diagnostic
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, code, message)
    }

    fn new(severity: DiagnosticSeverity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            row: None,
            question: None,
            column: None,
            context: None,
        }
    }

    /// Add row location
    pub fn at_row(mut self, row: usize, question: Option<&str>) -> Self {
        self.row = Some(row);
        self.question = question.map(str::to_string);
        self
    }

    /// Add the logic column and expression text
    pub fn in_column(mut self, column: LogicColumn, context: impl Into<String>) -> Self {
        self.column = Some(column);
        self.context = Some(context.into());
        self
    }
}

/// A logic expression that compiled cleanly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledLogic {
    /// Survey row number (1-based)
    pub row: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,

    pub column: LogicColumn,

    pub expression: CriteriaExpression,
}

/// Metadata about the validated form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Named rows
    pub question_count: usize,

    /// Non-blank relevant and constraint expressions
    pub expression_count: usize,
}

/// Result of form validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the form is valid (no errors)
    pub valid: bool,

    /// List of errors (severity = Error)
    pub errors: Vec<Diagnostic>,

    /// List of warnings (severity = Warning)
    pub warnings: Vec<Diagnostic>,

    pub metadata: FormMetadata,

    /// Expressions that compiled, in sheet order
    pub compiled: Vec<CompiledLogic>,

    /// Validation time in milliseconds
    pub validation_time_ms: u64,
}

impl ValidationResult {
    fn new(metadata: FormMetadata) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            metadata,
            compiled: Vec::new(),
            validation_time_ms: 0,
        }
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            DiagnosticSeverity::Error => {
                self.valid = false;
                self.errors.push(diagnostic);
            }
            DiagnosticSeverity::Warning => self.warnings.push(diagnostic),
        }
    }

    /// Compiled expression for `question`'s `column`, if it compiled
    pub fn expression_for(&self, question: &str, column: LogicColumn) -> Option<&CriteriaExpression> {
        self.compiled
            .iter()
            .find(|c| c.column == column && c.question.as_deref() == Some(question))
            .map(|c| &c.expression)
    }
}

/// Validator for the logic columns of a form
#[derive(Debug, Clone)]
pub struct FormValidator {
    relevant: LogicCompiler,
    constraint: LogicCompiler,
    options: ValidationOptions,
}

impl FormValidator {
    /// Create a new validator with default options
    pub fn new() -> Result<Self> {
        Self::with_options(ValidationOptions::default())
    }

    /// Create a validator with custom options
    pub fn with_options(options: ValidationOptions) -> Result<Self> {
        Ok(Self::from_compilers(
            LogicCompiler::relevant()?,
            LogicCompiler::constraint()?,
            options,
        ))
    }

    /// Create a validator reusing already-built compilers
    pub fn from_compilers(
        relevant: LogicCompiler,
        constraint: LogicCompiler,
        options: ValidationOptions,
    ) -> Self {
        Self {
            relevant,
            constraint,
            options,
        }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validate every logic expression of `form`
    pub fn validate(&self, form: &FormDefinition) -> ValidationResult {
        let start = Instant::now();
        let checker = ReferenceChecker::from_form(form);

        let mut result = ValidationResult::new(FormMetadata {
            id: form.id.clone(),
            question_count: form.question_names().len(),
            expression_count: 0,
        });

        if self.options.check_duplicate_names {
            for diagnostic in duplicate_names(form) {
                result.push(diagnostic);
            }
        }

        'rows: for (index, row) in form.survey.iter().enumerate() {
            let row_number = index + 1;
            let question = row.question_name();

            for column in [LogicColumn::Relevant, LogicColumn::Constraint] {
                let Some(text) = row.logic(column) else {
                    continue;
                };
                result.metadata.expression_count += 1;

                match self.check_expression(text, column, question, &checker) {
                    Ok(expression) => result.compiled.push(CompiledLogic {
                        row: row_number,
                        question: question.map(str::to_string),
                        column,
                        expression,
                    }),
                    Err(e) => {
                        result.push(
                            error_to_diagnostic(&e)
                                .at_row(row_number, question)
                                .in_column(column, text),
                        );
                        if self.options.fail_fast {
                            break 'rows;
                        }
                    }
                }
            }
        }

        result.validation_time_ms = start.elapsed().as_millis() as u64;
        log::debug!(
            "Validated {} expressions: {} errors, {} warnings",
            result.metadata.expression_count,
            result.errors.len(),
            result.warnings.len()
        );
        result
    }

    fn check_expression(
        &self,
        text: &str,
        column: LogicColumn,
        question: Option<&str>,
        checker: &ReferenceChecker,
    ) -> Result<CriteriaExpression> {
        let bound;
        let compiler = match column {
            LogicColumn::Relevant => &self.relevant,
            LogicColumn::Constraint => {
                bound = self.constraint.for_question(question.unwrap_or(""));
                &bound
            }
        };

        let expression = if self.options.verify_round_trip {
            compiler.verify_round_trip(text)?
        } else {
            compiler.compile(text)?
        };

        if self.options.check_references {
            checker.check(&expression, question.unwrap_or(""))?;
        }

        Ok(expression)
    }
}

fn error_to_diagnostic(error: &CompileError) -> Diagnostic {
    let code = match error {
        CompileError::Parse(_) => "E001",
        CompileError::UndefinedField { .. } => "E002",
        CompileError::RoundTripMismatch { .. } => "E003",
    };
    Diagnostic::error(code, error.to_string())
}

fn duplicate_names(form: &FormDefinition) -> Vec<Diagnostic> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut diagnostics = Vec::new();

    for (index, row) in form.survey.iter().enumerate() {
        let Some(name) = row.question_name() else {
            continue;
        };
        if !seen.insert(name) && reported.insert(name) {
            diagnostics.push(
                Diagnostic::warning("W001", format!("Question name '{}' is not unique", name))
                    .at_row(index + 1, Some(name)),
            );
        }
    }

    diagnostics
}

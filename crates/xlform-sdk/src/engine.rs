//! LogicEngine - compile, serialize and validate XLSForm logic
//!
//! The engine owns one compiled grammar per reference syntax and is cheap to
//! share: every method takes `&self`, and the engine is `Send + Sync`.

use crate::config::EngineConfig;
use crate::error::Result;
use xlform_compiler::{FormValidator, LogicCompiler, ValidationResult};
use xlform_core::{CriteriaExpression, FormDefinition, LogicColumn};
use xlform_parser::FormParser;

/// Two-way logic compiler with form validation
#[derive(Debug, Clone)]
pub struct LogicEngine {
    relevant: LogicCompiler,
    constraint: LogicCompiler,
    validator: FormValidator,
    config: EngineConfig,
}

impl LogicEngine {
    /// Create an engine from configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        let relevant = LogicCompiler::relevant()?;
        let constraint = LogicCompiler::constraint()?;
        let validator = FormValidator::from_compilers(
            relevant.clone(),
            constraint.clone(),
            config.validation.clone(),
        );

        tracing::info!(
            "Logic engine ready (strict_round_trip={}, check_references={})",
            config.strict_round_trip,
            config.validation.check_references
        );

        Ok(Self {
            relevant,
            constraint,
            validator,
            config,
        })
    }

    /// Engine with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compile a skip-logic expression (`${name}` references)
    pub fn compile(&self, text: &str) -> Result<CriteriaExpression> {
        self.compile_relevant(text)
    }

    /// Compile a `relevant` expression
    pub fn compile_relevant(&self, text: &str) -> Result<CriteriaExpression> {
        self.compile_with(&self.relevant, text)
    }

    /// Compile a `constraint` expression of `question`, where `.` means `question`
    pub fn compile_constraint(&self, text: &str, question: &str) -> Result<CriteriaExpression> {
        self.compile_with(&self.constraint.for_question(question), text)
    }

    /// Compile the expression stored in `column` of `question`
    pub fn compile_column(
        &self,
        text: &str,
        column: LogicColumn,
        question: &str,
    ) -> Result<CriteriaExpression> {
        match column {
            LogicColumn::Relevant => self.compile_relevant(text),
            LogicColumn::Constraint => self.compile_constraint(text, question),
        }
    }

    fn compile_with(&self, compiler: &LogicCompiler, text: &str) -> Result<CriteriaExpression> {
        let result = if self.config.strict_round_trip {
            compiler.verify_round_trip(text)
        } else {
            compiler.compile(text)
        };

        result.map_err(|e| {
            tracing::debug!("Rejected expression '{}': {}", text, e);
            e.into()
        })
    }

    /// Write criteria back as a skip-logic expression; never fails
    pub fn to_expression(&self, expr: &CriteriaExpression) -> String {
        self.relevant.to_expression(expr)
    }

    /// Write criteria back as a constraint of `question`, using `.` for it
    pub fn constraint_to_expression(&self, expr: &CriteriaExpression, question: &str) -> String {
        self.constraint.for_question(question).to_expression(expr)
    }

    /// Canonical spelling of a skip-logic expression
    pub fn normalize(&self, text: &str) -> Result<String> {
        Ok(self.relevant.normalize(text)?)
    }

    /// Validate every logic expression of a form
    pub fn validate_form(&self, form: &FormDefinition) -> ValidationResult {
        let result = self.validator.validate(form);

        if result.valid {
            tracing::info!(
                "Form {} valid: {} expressions, {} warnings",
                form.id.as_deref().unwrap_or("<unnamed>"),
                result.metadata.expression_count,
                result.warnings.len()
            );
        } else {
            tracing::warn!(
                "Form {} has {} logic errors",
                form.id.as_deref().unwrap_or("<unnamed>"),
                result.errors.len()
            );
        }

        result
    }

    /// Load a JSON or YAML form definition and validate it
    pub fn validate_form_str(&self, content: &str) -> Result<ValidationResult> {
        let form = FormParser::parse(content)?;
        Ok(self.validate_form(&form))
    }
}

//! Reference checker
//!
//! Verifies that every question a criterion reads actually exists in the form.

use crate::error::{CompileError, Result};
use std::collections::HashSet;
use xlform_core::{CriteriaExpression, FieldReference, FormDefinition};

/// Known question names of one form
#[derive(Debug, Clone, Default)]
pub struct ReferenceChecker {
    known: HashSet<String>,
}

impl ReferenceChecker {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_form(form: &FormDefinition) -> Self {
        Self::new(form.question_names())
    }

    pub fn is_known(&self, reference: &FieldReference) -> bool {
        self.known.contains(reference.name())
    }

    /// References in `expr` that name no question, each listed once
    pub fn unknown_references<'e>(&self, expr: &'e CriteriaExpression) -> Vec<&'e FieldReference> {
        expr.referenced_fields()
            .into_iter()
            .filter(|reference| !self.is_known(reference))
            .collect()
    }

    /// Fail on the first unknown reference in the logic of `question`
    pub fn check(&self, expr: &CriteriaExpression, question: &str) -> Result<()> {
        match self.unknown_references(expr).first() {
            Some(reference) => Err(CompileError::UndefinedField {
                field: reference.name().to_string(),
                question: question.to_string(),
            }),
            None => Ok(()),
        }
    }
}

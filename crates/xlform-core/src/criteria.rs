//! Criteria produced by the logic parser and consumed by the serializer

use crate::error::{CoreError, Result};
use crate::field::FieldReference;
use crate::operator::{CriterionKind, CriterionOperator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One atomic check extracted from a clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    /// Question the check reads
    pub name: FieldReference,
    pub operator: CriterionOperator,
    /// Right-hand value with quotes and `date(...)` removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_value: Option<String>,
}

impl Criterion {
    pub fn new(
        name: impl Into<FieldReference>,
        operator: CriterionOperator,
        response_value: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            operator,
            response_value,
        }
    }

    /// Answered / not answered check, which never carries a value
    pub fn existence(name: impl Into<FieldReference>, operator: CriterionOperator) -> Self {
        Self::new(name, operator, None)
    }

    /// Comparison or multiselect check against `value`
    pub fn with_value(
        name: impl Into<FieldReference>,
        operator: CriterionOperator,
        value: impl Into<String>,
    ) -> Self {
        Self::new(name, operator, Some(value.into()))
    }

    pub fn kind(&self) -> CriterionKind {
        self.operator.kind()
    }

    /// The response value, or an empty string when absent
    pub fn value_or_empty(&self) -> &str {
        self.response_value.as_deref().unwrap_or("")
    }
}

/// Top-level join keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinOperator {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl JoinOperator {
    /// Keyword as written in an expression
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinOperator::And => "and",
            JoinOperator::Or => "or",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            JoinOperator::And => "AND",
            JoinOperator::Or => "OR",
        }
    }
}

impl fmt::Display for JoinOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JoinOperator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(JoinOperator::And),
            "or" => Ok(JoinOperator::Or),
            _ => Err(CoreError::UnknownJoinOperator(s.to_string())),
        }
    }
}

/// Ordered criteria joined by a single operator
///
/// `operator` is set exactly when there is more than one criterion. The
/// constructors keep that invariant; values deserialized from elsewhere can
/// be checked with [`CriteriaExpression::is_well_formed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaExpression {
    pub criteria: Vec<Criterion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<JoinOperator>,
}

impl CriteriaExpression {
    /// Expression made of one criterion
    pub fn single(criterion: Criterion) -> Self {
        Self {
            criteria: vec![criterion],
            operator: None,
        }
    }

    /// Join criteria with `operator`, dropping the operator for a single criterion
    pub fn joined(criteria: Vec<Criterion>, operator: JoinOperator) -> Self {
        let operator = if criteria.len() > 1 { Some(operator) } else { None };
        Self { criteria, operator }
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Operator used between criteria when writing the expression back
    pub fn effective_operator(&self) -> JoinOperator {
        self.operator.unwrap_or(JoinOperator::And)
    }

    /// Check the join invariant and per-criterion value presence
    pub fn is_well_formed(&self) -> bool {
        let join_ok = match self.criteria.len() {
            0 => false,
            1 => self.operator.is_none(),
            _ => self.operator.is_some(),
        };

        join_ok
            && self
                .criteria
                .iter()
                .all(|c| c.operator.takes_value() == c.response_value.is_some())
    }

    /// Names of every question referenced, in order of appearance
    pub fn referenced_fields(&self) -> Vec<&FieldReference> {
        let mut seen = Vec::new();
        for criterion in &self.criteria {
            if !seen.contains(&&criterion.name) {
                seen.push(&criterion.name);
            }
        }
        seen
    }
}

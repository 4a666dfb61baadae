//! Survey sheet types for forms whose logic columns get compiled

use serde::{Deserialize, Serialize};

/// Which logic column an expression came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicColumn {
    /// Skip logic, written with `${name}` references
    Relevant,
    /// Validation logic, where `.` is the question itself
    Constraint,
}

impl LogicColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicColumn::Relevant => "relevant",
            LogicColumn::Constraint => "constraint",
        }
    }
}

/// One row of the survey sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SurveyRow {
    /// Question type (`integer`, `select_multiple colors`, `begin group`, ...)
    #[serde(rename = "type", default)]
    pub row_type: String,

    /// Question name; groups and notes may omit it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<String>,
}

impl SurveyRow {
    pub fn new(row_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            row_type: row_type.into(),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_relevant(mut self, relevant: impl Into<String>) -> Self {
        self.relevant = Some(relevant.into());
        self
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = Some(constraint.into());
        self
    }

    /// Name, if present and not blank
    pub fn question_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    /// Non-blank logic expression stored in `column`
    pub fn logic(&self, column: LogicColumn) -> Option<&str> {
        let value = match column {
            LogicColumn::Relevant => self.relevant.as_deref(),
            LogicColumn::Constraint => self.constraint.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

/// A form definition: the survey sheet of an XLSForm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FormDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub survey: Vec<SurveyRow>,
}

impl FormDefinition {
    pub fn new(survey: Vec<SurveyRow>) -> Self {
        Self { id: None, survey }
    }

    /// Names of all named rows, in sheet order
    pub fn question_names(&self) -> Vec<&str> {
        self.survey.iter().filter_map(SurveyRow::question_name).collect()
    }

    pub fn find(&self, name: &str) -> Option<&SurveyRow> {
        self.survey.iter().find(|row| row.question_name() == Some(name))
    }
}

//! Criterion operators and their source tokens

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of a criterion, which decides how it is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriterionKind {
    /// `${x} = ''`, `${x} != NULL`
    Existence,
    /// `${x} > 18`
    Comparison,
    /// `selected(${x}, 'a')`
    MultiSelect,
}

/// Criterion operators
///
/// Serialized names are the ones the rule-builder UI stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriterionOperator {
    /// Equal (=)
    #[serde(rename = "resp_equals")]
    Equals,
    /// Not equal (!=)
    #[serde(rename = "resp_notequals")]
    NotEquals,
    /// Greater than (>)
    #[serde(rename = "resp_greater")]
    Greater,
    /// Less than (<)
    #[serde(rename = "resp_less")]
    Less,
    /// Greater than or equal (>=)
    #[serde(rename = "resp_greaterequals")]
    GreaterEquals,
    /// Less than or equal (<=)
    #[serde(rename = "resp_lessequals")]
    LessEquals,
    /// Answered (!='' or !=NULL)
    #[serde(rename = "ans_notnull")]
    NotNull,
    /// Not answered (='' or =NULL)
    #[serde(rename = "ans_null")]
    Null,
    /// selected(ref, 'x')
    #[serde(rename = "multiplechoice_selected")]
    Selected,
    /// not(selected(ref, 'x'))
    #[serde(rename = "multiplechoice_notselected")]
    NotSelected,
}

impl CriterionOperator {
    /// Every operator, in table order
    pub const ALL: [CriterionOperator; 10] = [
        CriterionOperator::Equals,
        CriterionOperator::NotEquals,
        CriterionOperator::Greater,
        CriterionOperator::Less,
        CriterionOperator::GreaterEquals,
        CriterionOperator::LessEquals,
        CriterionOperator::NotNull,
        CriterionOperator::Null,
        CriterionOperator::Selected,
        CriterionOperator::NotSelected,
    ];

    /// Look up the operator for a normalized source token
    ///
    /// Existence tokens must already have internal whitespace removed and
    /// `NULL` upper-cased (`!=NULL`, `=''`). The multiselect operators are
    /// recognized by shape rather than token and are not returned here.
    pub fn from_token(token: &str) -> Result<Self> {
        match token {
            "=" => Ok(CriterionOperator::Equals),
            "!=" => Ok(CriterionOperator::NotEquals),
            ">" => Ok(CriterionOperator::Greater),
            "<" => Ok(CriterionOperator::Less),
            ">=" => Ok(CriterionOperator::GreaterEquals),
            "<=" => Ok(CriterionOperator::LessEquals),
            "!=''" | "!=NULL" => Ok(CriterionOperator::NotNull),
            "=''" | "=NULL" => Ok(CriterionOperator::Null),
            other => Err(CoreError::UnknownOperatorToken(other.to_string())),
        }
    }

    /// Canonical source token
    ///
    /// For comparisons this is the infix operator, for existence checks the
    /// operator with its empty literal, and for multiselect the function name.
    pub fn token(&self) -> &'static str {
        match self {
            CriterionOperator::Equals => "=",
            CriterionOperator::NotEquals => "!=",
            CriterionOperator::Greater => ">",
            CriterionOperator::Less => "<",
            CriterionOperator::GreaterEquals => ">=",
            CriterionOperator::LessEquals => "<=",
            CriterionOperator::NotNull => "!=''",
            CriterionOperator::Null => "=''",
            CriterionOperator::Selected => "selected",
            CriterionOperator::NotSelected => "not(selected",
        }
    }

    /// Name stored by the rule builder (`resp_equals`, `ans_null`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            CriterionOperator::Equals => "resp_equals",
            CriterionOperator::NotEquals => "resp_notequals",
            CriterionOperator::Greater => "resp_greater",
            CriterionOperator::Less => "resp_less",
            CriterionOperator::GreaterEquals => "resp_greaterequals",
            CriterionOperator::LessEquals => "resp_lessequals",
            CriterionOperator::NotNull => "ans_notnull",
            CriterionOperator::Null => "ans_null",
            CriterionOperator::Selected => "multiplechoice_selected",
            CriterionOperator::NotSelected => "multiplechoice_notselected",
        }
    }

    pub fn kind(&self) -> CriterionKind {
        match self {
            CriterionOperator::NotNull | CriterionOperator::Null => CriterionKind::Existence,
            CriterionOperator::Selected | CriterionOperator::NotSelected => {
                CriterionKind::MultiSelect
            }
            _ => CriterionKind::Comparison,
        }
    }

    /// Returns true if criteria with this operator carry a response value
    pub fn takes_value(&self) -> bool {
        self.kind() != CriterionKind::Existence
    }
}

impl fmt::Display for CriterionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CriterionOperator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| CoreError::UnknownOperatorName(s.to_string()))
    }
}

//! Field references and the syntaxes that spell them

use serde::{Deserialize, Serialize};
use std::fmt;

/// The question a criterion reads its value from
///
/// Always holds a resolved question name; the surface syntax (`${name}` or
/// `.`) is discarded once the reference is extracted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldReference(String);

impl FieldReference {
    /// Create a reference to the named question
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The question name
    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FieldReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldReference {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FieldReference {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for FieldReference {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FieldReference {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// How field references are written in an expression
///
/// `Bare` is the skip-logic grammar used by `relevant` columns, where every
/// reference is `${name}`. `Contextual` is the validation grammar used by
/// `constraint` columns, where `.` stands for the question being validated.
/// `${name}` is still accepted under `Contextual` so that a criterion edited
/// to point at another question can be written back and re-read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldReferenceSyntax {
    Bare,
    Contextual { current: String },
}

impl Default for FieldReferenceSyntax {
    fn default() -> Self {
        FieldReferenceSyntax::Bare
    }
}

impl FieldReferenceSyntax {
    /// Contextual syntax resolving `.` to `current`
    pub fn contextual(current: impl Into<String>) -> Self {
        FieldReferenceSyntax::Contextual {
            current: current.into(),
        }
    }

    /// Regex fragment (without capture group) matching one reference
    pub fn reference_pattern(&self) -> &'static str {
        match self {
            FieldReferenceSyntax::Bare => r"\$\{\w+\}",
            FieldReferenceSyntax::Contextual { .. } => r"\$\{\w+\}|\.",
        }
    }

    /// Resolve the raw text matched by [`Self::reference_pattern`]
    ///
    /// Returns `None` when the text is not a reference in this syntax, or
    /// when `.` is used but the current question has no name.
    pub fn resolve(&self, raw: &str) -> Option<FieldReference> {
        let raw = raw.trim();
        if let Some(inner) = raw.strip_prefix("${").and_then(|r| r.strip_suffix('}')) {
            if inner.is_empty() {
                return None;
            }
            return Some(FieldReference::new(inner));
        }

        match self {
            FieldReferenceSyntax::Contextual { current } if raw == "." && !current.is_empty() => {
                Some(FieldReference::new(current.clone()))
            }
            _ => None,
        }
    }

    /// Write a reference back in this syntax
    pub fn render(&self, reference: &FieldReference) -> String {
        match self {
            FieldReferenceSyntax::Contextual { current } if reference.name() == current => {
                ".".to_string()
            }
            _ => format!("${{{}}}", reference.name()),
        }
    }
}

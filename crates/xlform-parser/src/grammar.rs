//! Compiled patterns for one field-reference syntax
//!
//! The skip-logic and validation grammars differ only in how a field
//! reference is spelled, so both are produced here from
//! [`FieldReferenceSyntax::reference_pattern`].

use crate::error::Result;
use regex::{Captures, Regex};
use xlform_core::FieldReferenceSyntax;

/// Join keyword between clauses
const JOIN_PATTERN: &str = r"(?i)\s+(and|or)\s+";

/// Right-hand side of a comparison, tried in order
const VALUE_PATTERN: &str = concat!(
    r"date\(\s*'\d{4}-\d{2}-\d{2}'\s*\)",
    r"|'[^']*'",
    r#"|"[^"]*""#,
    r"|-?\d+(?:\.\d+)?",
    r"|[\w\s]*\w",
);

/// Regular expressions recognizing each criterion shape
#[derive(Debug, Clone)]
pub struct Grammar {
    existence: Regex,
    comparison: Regex,
    multiselect: Regex,
    join: Regex,
    accepts_current_row: bool,
}

impl Grammar {
    /// Build the grammar for `syntax`
    pub fn for_syntax(syntax: &FieldReferenceSyntax) -> Result<Self> {
        let reference = syntax.reference_pattern();

        let existence = Regex::new(&format!(
            r#"^(?P<ref>{reference})\s*(?P<op>(?:=|!=)\s*(?i:NULL|''|""))$"#
        ))?;
        let comparison = Regex::new(&format!(
            r"^(?P<ref>{reference})\s*(?P<op>!=|>=|<=|=|>|<)\s*(?P<value>{VALUE_PATTERN})$"
        ))?;
        let multiselect = Regex::new(&format!(
            r#"selected\(\s*(?P<ref>{reference})\s*,\s*(?P<value>'[^']*'|"[^"]*")\s*\)"#
        ))?;
        let join = Regex::new(JOIN_PATTERN)?;

        Ok(Self {
            existence,
            comparison,
            multiselect,
            join,
            accepts_current_row: matches!(syntax, FieldReferenceSyntax::Contextual { .. }),
        })
    }

    /// `${x} = NULL`, `${x} != ''`, `${x} = ""`
    pub fn match_existence<'t>(&self, clause: &'t str) -> Option<Captures<'t>> {
        self.existence.captures(clause)
    }

    /// `${x} >= 18`, `${x} = date('2020-01-01')`
    pub fn match_comparison<'t>(&self, clause: &'t str) -> Option<Captures<'t>> {
        self.comparison.captures(clause)
    }

    /// `selected(${x}, 'a')`, unanchored so the caller can inspect what surrounds it
    pub fn match_multiselect<'t>(&self, clause: &'t str) -> Option<Captures<'t>> {
        self.multiselect.captures(clause)
    }

    pub fn join(&self) -> &Regex {
        &self.join
    }

    /// Whether this grammar was built for the contextual syntax
    pub fn accepts_current_row(&self) -> bool {
        self.accepts_current_row
    }
}

//! Criterion extraction for a single clause
//!
//! A clause is one boolean check with no top-level `and`/`or`. Shapes are
//! tried in a fixed order:
//!
//! 1. existence (`${x} = ''`, `${x} != ""`, `${x} != NULL`)
//! 2. comparison (`${x} > 18`, `${x} = date('2020-01-01')`)
//! 3. multiselect (`selected(${x}, 'a')`, `not(selected(${x}, 'a'))`)
//!
//! Existence must come before comparison, since `!=` followed by `''` is also
//! a valid comparison against an empty literal.
//!
//! Negated multiselect is detected textually: the clause must read `not(`
//! immediately before `selected(` and close with one extra `)`. Nested
//! parentheses or other negations are not understood.

use crate::error::{ParseError, Result};
use crate::grammar::Grammar;
use std::sync::Arc;
use xlform_core::{Criterion, CriterionOperator, FieldReference, FieldReferenceSyntax};

/// Extracts one [`Criterion`] per clause
#[derive(Debug, Clone)]
pub struct CriterionExtractor {
    grammar: Arc<Grammar>,
    syntax: FieldReferenceSyntax,
}

impl CriterionExtractor {
    pub fn new(grammar: Arc<Grammar>, syntax: FieldReferenceSyntax) -> Self {
        Self { grammar, syntax }
    }

    pub fn syntax(&self) -> &FieldReferenceSyntax {
        &self.syntax
    }

    /// Extract the criterion for `clause`
    ///
    /// Fails with [`ParseError::UnrecognizedClause`] carrying the clause text
    /// when no shape matches.
    pub fn extract(&self, clause: &str) -> Result<Criterion> {
        let trimmed = clause.trim();
        if trimmed.is_empty() {
            return Err(ParseError::unrecognized(clause));
        }

        if let Some(criterion) = self.extract_existence(trimmed)? {
            return Ok(criterion);
        }
        if let Some(criterion) = self.extract_comparison(trimmed)? {
            return Ok(criterion);
        }
        if let Some(criterion) = self.extract_multiselect(trimmed) {
            return Ok(criterion);
        }

        log::debug!("No criterion shape matched clause: {}", trimmed);
        Err(ParseError::unrecognized(trimmed))
    }

    fn extract_existence(&self, clause: &str) -> Result<Option<Criterion>> {
        let Some(caps) = self.grammar.match_existence(clause) else {
            return Ok(None);
        };
        let Some(name) = self.resolve(&caps["ref"]) else {
            return Ok(None);
        };

        let token: String = caps["op"]
            .split_whitespace()
            .collect::<String>()
            .to_ascii_uppercase()
            .replace("\"\"", "''");
        let operator = CriterionOperator::from_token(&token)?;

        Ok(Some(Criterion::existence(name, operator)))
    }

    fn extract_comparison(&self, clause: &str) -> Result<Option<Criterion>> {
        let Some(caps) = self.grammar.match_comparison(clause) else {
            return Ok(None);
        };
        let Some(name) = self.resolve(&caps["ref"]) else {
            return Ok(None);
        };

        let operator = CriterionOperator::from_token(&caps["op"])?;
        let value = unwrap_literal(&caps["value"]);

        Ok(Some(Criterion::with_value(name, operator, value)))
    }

    fn extract_multiselect(&self, clause: &str) -> Option<Criterion> {
        let caps = self.grammar.match_multiselect(clause)?;
        let whole = caps.get(0)?;
        let name = self.resolve(&caps["ref"])?;

        let before = clause[..whole.start()].trim();
        let after = clause[whole.end()..].trim();
        let operator = match (before, after) {
            ("", "") => CriterionOperator::Selected,
            ("not(", ")") => CriterionOperator::NotSelected,
            _ => return None,
        };

        Some(Criterion::with_value(
            name,
            operator,
            unwrap_literal(&caps["value"]),
        ))
    }

    fn resolve(&self, raw: &str) -> Option<FieldReference> {
        self.syntax.resolve(raw)
    }
}

/// Strip surrounding quotes and unwrap `date('YYYY-MM-DD')`
pub fn unwrap_literal(raw: &str) -> String {
    let raw = raw.trim();

    if let Some(inner) = raw
        .strip_prefix("date(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return strip_quotes(inner.trim()).to_string();
    }

    strip_quotes(raw).to_string()
}

fn strip_quotes(raw: &str) -> &str {
    for quote in ['\'', '"'] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

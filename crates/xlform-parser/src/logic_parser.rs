//! Expression splitter and compiler
//!
//! Splits a full expression on its top-level join keyword and extracts one
//! criterion per clause. Only a single join keyword may be used throughout:
//! `a and b and c` or `a or b or c`, never a mix.

use crate::error::{ParseError, Result};
use crate::extractor::CriterionExtractor;
use crate::grammar::Grammar;
use std::ops::Range;
use std::sync::Arc;
use xlform_core::{CriteriaExpression, FieldReferenceSyntax, JoinOperator};

/// Compiles expression strings into [`CriteriaExpression`] values
///
/// # Example
///
/// ```
/// use xlform_parser::LogicParser;
/// use xlform_core::{CriterionOperator, JoinOperator};
///
/// let parser = LogicParser::bare().unwrap();
/// let expr = parser.compile("${a} = 1 and ${b} != ''").unwrap();
/// assert_eq!(expr.criteria.len(), 2);
/// assert_eq!(expr.operator, Some(JoinOperator::And));
/// assert_eq!(expr.criteria[1].operator, CriterionOperator::NotNull);
/// ```
#[derive(Debug, Clone)]
pub struct LogicParser {
    grammar: Arc<Grammar>,
    extractor: CriterionExtractor,
}

impl LogicParser {
    /// Create a parser for `syntax`
    pub fn new(syntax: FieldReferenceSyntax) -> Result<Self> {
        let grammar = Arc::new(Grammar::for_syntax(&syntax)?);
        Ok(Self::with_grammar(grammar, syntax))
    }

    /// Parser for skip logic, where every reference is `${name}`
    pub fn bare() -> Result<Self> {
        Self::new(FieldReferenceSyntax::Bare)
    }

    /// Parser for validation logic of the question named `current`
    pub fn contextual(current: impl Into<String>) -> Result<Self> {
        Self::new(FieldReferenceSyntax::contextual(current))
    }

    fn with_grammar(grammar: Arc<Grammar>, syntax: FieldReferenceSyntax) -> Self {
        let extractor = CriterionExtractor::new(Arc::clone(&grammar), syntax);
        Self { grammar, extractor }
    }

    /// Same grammar, with `.` resolving to `current`
    ///
    /// A parser built for the bare syntax is returned unchanged, since it
    /// never accepts `.`.
    pub fn for_question(&self, current: impl Into<String>) -> Self {
        if !self.grammar.accepts_current_row() {
            return self.clone();
        }
        Self::with_grammar(
            Arc::clone(&self.grammar),
            FieldReferenceSyntax::contextual(current),
        )
    }

    pub fn syntax(&self) -> &FieldReferenceSyntax {
        self.extractor.syntax()
    }

    /// Compile a full expression
    ///
    /// # Errors
    ///
    /// - [`ParseError::EmptyExpression`] for blank input
    /// - [`ParseError::MixedJoinOperators`] when `and` and `or` both appear
    /// - [`ParseError::UnrecognizedClause`] when any clause matches no shape
    pub fn compile(&self, text: &str) -> Result<CriteriaExpression> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        let joins = self.find_joins(text);

        let Some((first_keyword, _)) = joins.first() else {
            let criterion = self.extractor.extract(text)?;
            log::debug!("Compiled single-clause expression: {}", text);
            return Ok(CriteriaExpression::single(criterion));
        };

        if let Some((second_keyword, _)) = joins
            .iter()
            .find(|(keyword, _)| !keyword.eq_ignore_ascii_case(first_keyword))
        {
            return Err(ParseError::MixedJoinOperators {
                first: first_keyword.to_string(),
                second: second_keyword.to_string(),
            });
        }
        let operator: JoinOperator = first_keyword.parse()?;

        let mut criteria = Vec::with_capacity(joins.len() + 1);
        let mut start = 0;
        for (_, span) in &joins {
            criteria.push(self.extractor.extract(&text[start..span.start])?);
            start = span.end;
        }
        criteria.push(self.extractor.extract(&text[start..])?);

        log::debug!(
            "Compiled {} criteria joined by {}: {}",
            criteria.len(),
            operator,
            text
        );
        Ok(CriteriaExpression::joined(criteria, operator))
    }

    /// Top-level join keywords with the span of the whole separator
    ///
    /// Matches that start inside a quoted literal are skipped.
    fn find_joins<'t>(&self, text: &'t str) -> Vec<(&'t str, Range<usize>)> {
        let quoted = quoted_spans(text);
        self.grammar
            .join()
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let keyword = caps.get(1)?;
                let inside_quotes = quoted.iter().any(|q| q.contains(&whole.start()));
                (!inside_quotes).then(|| (keyword.as_str(), whole.range()))
            })
            .collect()
    }
}

/// Byte ranges covered by quoted literals, quotes included
///
/// An unterminated quote runs to the end of the text.
fn quoted_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut open: Option<(char, usize)> = None;

    for (idx, ch) in text.char_indices() {
        match open {
            Some((quote, start)) if ch == quote => {
                spans.push(start..idx + 1);
                open = None;
            }
            Some(_) => {}
            None if ch == '\'' || ch == '"' => open = Some((ch, idx)),
            None => {}
        }
    }

    if let Some((_, start)) = open {
        spans.push(start..text.len());
    }
    spans
}

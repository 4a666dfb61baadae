//! Expression serializer
//!
//! Writes criteria back as XLSForm logic. Output re-parses to the same
//! criteria, though spacing and quoting are canonical rather than whatever
//! the author typed:
//!
//! - existence checks use `''`, never `NULL`
//! - ISO dates are wrapped in `date('...')`
//! - numbers are written bare, anything else in single quotes (double
//!   quotes when the value itself contains `'`)

use xlform_core::{
    CriteriaExpression, Criterion, CriterionKind, CriterionOperator, FieldReferenceSyntax,
};

/// Criteria to expression text
#[derive(Debug, Clone, Default)]
pub struct ExpressionSerializer {
    syntax: FieldReferenceSyntax,
}

impl ExpressionSerializer {
    pub fn new(syntax: FieldReferenceSyntax) -> Self {
        Self { syntax }
    }

    /// Serializer writing every reference as `${name}`
    pub fn bare() -> Self {
        Self::new(FieldReferenceSyntax::Bare)
    }

    /// Serializer writing references to `current` as `.`
    pub fn contextual(current: impl Into<String>) -> Self {
        Self::new(FieldReferenceSyntax::contextual(current))
    }

    pub fn syntax(&self) -> &FieldReferenceSyntax {
        &self.syntax
    }

    /// Write a whole expression
    ///
    /// An expression with several criteria but no operator is joined with
    /// `and`.
    pub fn serialize(&self, expr: &CriteriaExpression) -> String {
        let separator = format!(" {} ", expr.effective_operator().keyword());
        expr.criteria
            .iter()
            .map(|criterion| self.serialize_criterion(criterion))
            .collect::<Vec<_>>()
            .join(&separator)
    }

    /// Write one criterion
    pub fn serialize_criterion(&self, criterion: &Criterion) -> String {
        let reference = self.syntax.render(&criterion.name);
        let value = criterion.value_or_empty();

        match criterion.operator.kind() {
            CriterionKind::Existence => {
                let op = if criterion.operator == CriterionOperator::NotNull {
                    "!="
                } else {
                    "="
                };
                format!("{} {} ''", reference, op)
            }
            CriterionKind::Comparison => format!(
                "{} {} {}",
                reference,
                criterion.operator.token(),
                render_value(value)
            ),
            CriterionKind::MultiSelect => {
                let call = format!("selected({}, {})", reference, quote(value));
                if criterion.operator == CriterionOperator::NotSelected {
                    format!("not({})", call)
                } else {
                    call
                }
            }
        }
    }
}

/// Right-hand side of a comparison
fn render_value(value: &str) -> String {
    if is_iso_date(value) {
        format!("date('{}')", value)
    } else if is_number(value) {
        value.to_string()
    } else {
        quote(value)
    }
}

fn quote(value: &str) -> String {
    if value.contains('\'') {
        format!("\"{}\"", value)
    } else {
        format!("'{}'", value)
    }
}

/// `YYYY-MM-DD`
fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Optional minus, digits, optional `.digits`
fn is_number(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.map_or(true, all_digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xlform_core::JoinOperator;

    #[test]
    fn test_existence() {
        let s = ExpressionSerializer::bare();
        assert_eq!(
            s.serialize_criterion(&Criterion::existence("x", CriterionOperator::NotNull)),
            "${x} != ''"
        );
        assert_eq!(
            s.serialize_criterion(&Criterion::existence("x", CriterionOperator::Null)),
            "${x} = ''"
        );
    }

    #[test]
    fn test_comparison_values() {
        let s = ExpressionSerializer::bare();
        let cases = [
            (CriterionOperator::Greater, "18", "${q} > 18"),
            (CriterionOperator::LessEquals, "-2.5", "${q} <= -2.5"),
            (CriterionOperator::Equals, "yes", "${q} = 'yes'"),
            (CriterionOperator::NotEquals, "o'neil", "${q} != \"o'neil\""),
            (CriterionOperator::GreaterEquals, "2020-01-01", "${q} >= date('2020-01-01')"),
            (CriterionOperator::Equals, "1.", "${q} = '1.'"),
        ];

        for (op, value, expected) in cases {
            assert_eq!(
                s.serialize_criterion(&Criterion::with_value("q", op, value)),
                expected
            );
        }
    }

    #[test]
    fn test_multiselect() {
        let s = ExpressionSerializer::bare();
        assert_eq!(
            s.serialize_criterion(&Criterion::with_value("color", CriterionOperator::Selected, "red")),
            "selected(${color}, 'red')"
        );
        assert_eq!(
            s.serialize_criterion(&Criterion::with_value(
                "color",
                CriterionOperator::NotSelected,
                "red"
            )),
            "not(selected(${color}, 'red'))"
        );
    }

    #[test]
    fn test_multiselect_date_like_option_stays_quoted() {
        let s = ExpressionSerializer::bare();
        assert_eq!(
            s.serialize_criterion(&Criterion::with_value(
                "when",
                CriterionOperator::Selected,
                "2020-01-01"
            )),
            "selected(${when}, '2020-01-01')"
        );
    }

    #[test]
    fn test_join() {
        let s = ExpressionSerializer::bare();
        let expr = CriteriaExpression::joined(
            vec![
                Criterion::with_value("a", CriterionOperator::Equals, "1"),
                Criterion::with_value("b", CriterionOperator::Equals, "2"),
            ],
            JoinOperator::Or,
        );
        assert_eq!(s.serialize(&expr), "${a} = 1 or ${b} = 2");
    }

    #[test]
    fn test_missing_operator_defaults_to_and() {
        let expr = CriteriaExpression {
            criteria: vec![
                Criterion::existence("a", CriterionOperator::Null),
                Criterion::existence("b", CriterionOperator::NotNull),
            ],
            operator: None,
        };
        assert_eq!(
            ExpressionSerializer::bare().serialize(&expr),
            "${a} = '' and ${b} != ''"
        );
    }

    #[test]
    fn test_contextual_current_row() {
        let s = ExpressionSerializer::contextual("age");
        let expr = CriteriaExpression::joined(
            vec![
                Criterion::with_value("age", CriterionOperator::GreaterEquals, "0"),
                Criterion::existence("consent", CriterionOperator::NotNull),
            ],
            JoinOperator::And,
        );
        assert_eq!(s.serialize(&expr), ". >= 0 and ${consent} != ''");
    }

    #[test]
    fn test_value_helpers() {
        assert!(is_iso_date("2024-12-31"));
        assert!(!is_iso_date("2024-1-31"));
        assert!(!is_iso_date("2024/12/31"));
        assert!(is_number("0"));
        assert!(is_number("-10.25"));
        assert!(!is_number("-"));
        assert!(!is_number(".5"));
        assert!(!is_number("1e3"));
    }
}

//! Unit tests for serialization and round trips
//!
//! Every expression the parser accepts must serialize to text that parses
//! back to identical criteria.

use xlform_compiler::*;
use xlform_core::{CriteriaExpression, Criterion, CriterionOperator, JoinOperator};

const RELEVANT_CORPUS: &[&str] = &[
    "${age} > 18",
    "${x} != ''",
    "${x} = NULL",
    "${x}!=null",
    "${dob} = date('2020-01-01')",
    "${dob} >= '2020-01-01'",
    "${city} = 'New York'",
    "${city} = New York",
    "${nick} != \"o'neil\"",
    "${temp} <= -3.5",
    "${code} = '007'",
    "${a}=1 and ${b}=2",
    "${a}=1 OR ${b}=2 or ${c}=3",
    "selected(${color}, 'red')",
    "not(selected(${color}, 'red'))",
    "selected(${color},'dark red') and ${age} < 65",
    "${genre} = 'rock and roll' or ${genre} = 'blues'",
    "${x} > ''",
];

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_round_trip_relevant_corpus() {
    let compiler = LogicCompiler::relevant().unwrap();

    for text in RELEVANT_CORPUS {
        let first = compiler.compile(text).unwrap();
        let serialized = compiler.to_expression(&first);
        let second = compiler.compile(&serialized).unwrap();
        assert_eq!(first, second, "'{}' serialized as '{}'", text, serialized);
    }
}

#[test]
fn test_verify_round_trip_accepts_corpus() {
    let compiler = LogicCompiler::relevant().unwrap();
    for text in RELEVANT_CORPUS {
        assert!(compiler.verify_round_trip(text).is_ok(), "failed on '{}'", text);
    }
}

#[test]
fn test_round_trip_constraint_corpus() {
    let compiler = LogicCompiler::constraint().unwrap().for_question("weight");

    for text in [
        ". > 0",
        ". >= 0.5 and . <= 300",
        ". != '' or ${unit} = 'lb'",
        "not(selected(., 'none'))",
        ". < date('2030-12-31')",
    ] {
        let first = compiler.compile(text).unwrap();
        let serialized = compiler.to_expression(&first);
        assert_eq!(compiler.compile(&serialized).unwrap(), first, "{}", serialized);
    }
}

#[test]
fn test_serialized_text_is_canonical() {
    let compiler = LogicCompiler::relevant().unwrap();
    let cases = [
        ("${x}!=null", "${x} != ''"),
        ("${a}=1 OR ${b}=2", "${a} = 1 or ${b} = 2"),
        ("selected(${c},'r')", "selected(${c}, 'r')"),
        ("${dob} >= '2020-01-01'", "${dob} >= date('2020-01-01')"),
        ("${city} = New York", "${city} = 'New York'"),
    ];

    for (input, expected) in cases {
        assert_eq!(compiler.normalize(input).unwrap(), expected);
    }
}

// =============================================================================
// Serializer Tests
// =============================================================================

#[test]
fn test_serialize_ui_built_expression() {
    let expr = CriteriaExpression::joined(
        vec![
            Criterion::with_value("age", CriterionOperator::GreaterEquals, "18"),
            Criterion::with_value("langs", CriterionOperator::Selected, "en"),
            Criterion::existence("email", CriterionOperator::Null),
        ],
        JoinOperator::Or,
    );

    let text = ExpressionSerializer::bare().serialize(&expr);
    assert_eq!(text, "${age} >= 18 or selected(${langs}, 'en') or ${email} = ''");
}

#[test]
fn test_serialize_from_ui_json() {
    let json = r#"{"criteria": [{"name": "dob", "operator": "resp_less", "response_value": "2000-06-15"}]}"#;
    let expr: CriteriaExpression = serde_json::from_str(json).unwrap();
    assert_eq!(
        ExpressionSerializer::bare().serialize(&expr),
        "${dob} < date('2000-06-15')"
    );
}

#[test]
fn test_single_criterion_round_trip_keeps_operator_absent() {
    let compiler = LogicCompiler::relevant().unwrap();
    let expr = compiler.compile("${age} > 18").unwrap();
    let again = compiler.compile(&compiler.to_expression(&expr)).unwrap();
    assert_eq!(again.operator, None);
}

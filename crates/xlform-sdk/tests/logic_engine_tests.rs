//! End-to-end tests for the logic engine
//!
//! Covers the behaviors the rule-builder UI depends on: compile, edit,
//! serialize, and validate whole forms.

use xlform_parser::ParseError;
use xlform_sdk::*;

fn engine() -> LogicEngine {
    LogicEngine::with_defaults().expect("engine builds")
}

// =============================================================================
// Compile Tests
// =============================================================================

#[test]
fn test_single_clause_has_no_operator() {
    let expr = engine().compile("${age} > 18").unwrap();
    let json = serde_json::to_value(&expr).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "criteria": [{"name": "age", "operator": "resp_greater", "response_value": "18"}]
        })
    );
}

#[test]
fn test_two_clause_and() {
    let expr = engine().compile("${a}=1 and ${b}=2").unwrap();
    assert_eq!(expr.criteria.len(), 2);
    assert_eq!(expr.operator, Some(JoinOperator::And));
}

#[test]
fn test_existence_before_comparison() {
    let expr = engine().compile("${x} != ''").unwrap();
    assert_eq!(expr.criteria[0].operator, CriterionOperator::NotNull);
    assert_eq!(expr.criteria[0].name, "x");
}

#[test]
fn test_date_unwrap_and_rewrap() {
    let engine = engine();
    let expr = engine.compile("${dob} = date('2020-01-01')").unwrap();
    assert_eq!(expr.criteria[0].response_value.as_deref(), Some("2020-01-01"));
    assert!(engine.to_expression(&expr).contains("date('2020-01-01')"));
}

#[test]
fn test_multiselect() {
    let engine = engine();
    let selected = engine.compile("selected(${color}, 'red')").unwrap();
    assert_eq!(selected.criteria[0].operator, CriterionOperator::Selected);
    assert_eq!(selected.criteria[0].response_value.as_deref(), Some("red"));

    let not_selected = engine.compile("not(selected(${color}, 'red'))").unwrap();
    assert_eq!(not_selected.criteria[0].operator, CriterionOperator::NotSelected);
}

#[test]
fn test_error_taxonomy() {
    let engine = engine();

    let err = engine.compile("${a}=1 and ${b}=2 or ${c}=3").unwrap_err();
    assert!(matches!(
        err.as_parse_error(),
        Some(ParseError::MixedJoinOperators { .. })
    ));

    let err = engine.compile("${a} ~~ 1").unwrap_err();
    match err.as_parse_error() {
        Some(ParseError::UnrecognizedClause { clause }) => assert_eq!(clause, "${a} ~~ 1"),
        other => panic!("Expected UnrecognizedClause, got {:?}", other),
    }

    let err = engine.compile("  ").unwrap_err();
    assert!(matches!(err.as_parse_error(), Some(ParseError::EmptyExpression)));
}

// =============================================================================
// Editing Workflow Tests
// =============================================================================

#[test]
fn test_ui_edit_then_save() {
    let engine = engine();
    let mut expr = engine.compile("${age} > 18").unwrap();

    // The rule builder adds a second row and switches to OR
    expr.criteria.push(Criterion::with_value(
        "consent",
        CriterionOperator::Equals,
        "yes",
    ));
    expr.operator = Some(JoinOperator::Or);

    let saved = engine.to_expression(&expr);
    assert_eq!(saved, "${age} > 18 or ${consent} = 'yes'");
    assert_eq!(engine.compile(&saved).unwrap(), expr);
}

#[test]
fn test_round_trip_property() {
    let engine = engine();
    for text in [
        "${age} > 18",
        "${x} = NULL or ${y} != ''",
        "selected(${fruit}, 'apple') and not(selected(${fruit}, 'pear'))",
        "${d} < date('1999-12-31') and ${n} >= -1 and ${s} = 'a b c'",
        r#"${x} = """#,
        r#"${x} != "" and ${y} = ''"#,
    ] {
        let once = engine.compile(text).unwrap();
        let twice = engine.compile(&engine.to_expression(&once)).unwrap();
        assert_eq!(once, twice, "round trip changed '{}'", text);
    }
}

#[test]
fn test_double_quoted_empty_is_existence_check() {
    let engine = engine();
    let expr = engine.compile(r#"${x} = "" or ${y} != """#).unwrap();
    assert_eq!(expr.criteria[0].operator, CriterionOperator::Null);
    assert_eq!(expr.criteria[1].operator, CriterionOperator::NotNull);
    assert_eq!(expr.criteria[0].response_value, None);
    assert_eq!(engine.to_expression(&expr), "${x} = '' or ${y} != ''");
}

#[test]
fn test_normalize() {
    assert_eq!(
        engine().normalize("${x}!=NULL AND selected(${c},'a')").unwrap(),
        "${x} != '' and selected(${c}, 'a')"
    );
}

// =============================================================================
// Form Validation Tests
// =============================================================================

const FORM_YAML: &str = r#"
id: clinic_intake
survey:
  - type: integer
    name: age
    constraint: ". >= 0 and . <= 120"
  - type: select_one yes_no
    name: pregnant
    relevant: "${age} >= 12 and ${sex} = 'female'"
  - type: select_one sex
    name: sex
  - type: begin group
    name: followup
    relevant: "${pregnant} = 'yes' or ${age} > 65 and ${sex} = 'male'"
  - type: date
    name: visit
    constraint: ". > date('2020-01-01')"
"#;

#[test]
fn test_validate_yaml_form() {
    let result = engine().validate_form_str(FORM_YAML).unwrap();

    assert!(!result.valid);
    assert_eq!(result.metadata.id.as_deref(), Some("clinic_intake"));
    assert_eq!(result.metadata.expression_count, 4);
    assert_eq!(result.compiled.len(), 3);

    assert_eq!(result.errors.len(), 1);
    let error = &result.errors[0];
    assert_eq!(error.question.as_deref(), Some("followup"));
    assert_eq!(error.column, Some(LogicColumn::Relevant));
    assert!(error.message.contains("mixed join operators"));
}

#[test]
fn test_fail_fast_from_builder() {
    let form = FormDefinition::new(vec![
        SurveyRow::new("text", "a").with_relevant("${missing} = 1"),
        SurveyRow::new("text", "b").with_relevant("${a} ~~ 1"),
    ]);

    let full = engine().validate_form(&form);
    assert_eq!(full.errors.len(), 2);
    assert_eq!(full.errors[0].code, "E002");
    assert_eq!(full.errors[1].code, "E001");

    let fast = LogicEngineBuilder::new()
        .fail_fast(true)
        .build()
        .unwrap()
        .validate_form(&form);
    assert_eq!(fast.errors.len(), 1);
}

#[test]
fn test_validation_result_serializes_for_ui() {
    let form = FormDefinition::new(vec![
        SurveyRow::new("integer", "age").with_constraint(". > 0"),
        SurveyRow::new("integer", "age"),
    ]);

    let result = engine().validate_form(&form);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["valid"], serde_json::json!(true));
    assert_eq!(json["warnings"][0]["code"], serde_json::json!("W001"));
    assert_eq!(json["warnings"][0]["severity"], serde_json::json!("warning"));
    assert_eq!(
        json["compiled"][0]["expression"]["criteria"][0]["operator"],
        serde_json::json!("resp_greater")
    );
}

//! Form definition loader
//!
//! Reads the survey sheet of a form from JSON or YAML.

use crate::error::{ParseError, Result};
use xlform_core::FormDefinition;

/// Form definition parser
pub struct FormParser;

impl FormParser {
    /// Parse a form definition, choosing JSON when the content is a JSON object
    pub fn parse(content: &str) -> Result<FormDefinition> {
        if content.trim_start().starts_with('{') {
            Self::parse_json(content)
        } else {
            Self::parse_yaml(content)
        }
    }

    /// Parse a JSON form definition
    pub fn parse_json(content: &str) -> Result<FormDefinition> {
        let form: FormDefinition = serde_json::from_str(content)?;
        Self::check(form)
    }

    /// Parse a YAML form definition
    pub fn parse_yaml(content: &str) -> Result<FormDefinition> {
        let form: FormDefinition = serde_yaml::from_str(content)?;
        Self::check(form)
    }

    fn check(form: FormDefinition) -> Result<FormDefinition> {
        if form.survey.is_empty() {
            return Err(ParseError::InvalidForm("survey has no rows".to_string()));
        }

        if let Some(index) = form.survey.iter().position(|row| row.row_type.trim().is_empty()) {
            return Err(ParseError::InvalidForm(format!(
                "survey row {} has no type",
                index + 1
            )));
        }

        log::debug!("Loaded form with {} survey rows", form.survey.len());
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xlform_core::LogicColumn;

    #[test]
    fn test_parse_yaml_form() {
        let yaml = r#"
id: household
survey:
  - type: integer
    name: age
    constraint: ". >= 0 and . < 130"
  - type: select_multiple colors
    name: color
    relevant: "${age} > 18"
"#;

        let form = FormParser::parse(yaml).unwrap();
        assert_eq!(form.id.as_deref(), Some("household"));
        assert_eq!(form.survey.len(), 2);
        assert_eq!(form.survey[1].logic(LogicColumn::Relevant), Some("${age} > 18"));
    }

    #[test]
    fn test_parse_json_form() {
        let json = r#"{"survey": [{"type": "text", "name": "q1"}]}"#;
        let form = FormParser::parse(json).unwrap();
        assert_eq!(form.question_names(), vec!["q1"]);
    }

    #[test]
    fn test_empty_survey_rejected() {
        let result = FormParser::parse_json(r#"{"survey": []}"#);
        assert!(matches!(result, Err(ParseError::InvalidForm(_))));
    }

    #[test]
    fn test_row_without_type_rejected() {
        let result = FormParser::parse_yaml("survey:\n  - name: q1\n");
        match result {
            Err(ParseError::InvalidForm(msg)) => assert!(msg.contains("row 1")),
            other => panic!("Expected InvalidForm, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_content() {
        assert!(matches!(FormParser::parse("{not json"), Err(ParseError::Json(_))));
        assert!(matches!(
            FormParser::parse_yaml("survey: [unclosed"),
            Err(ParseError::Yaml(_))
        ));
    }
}

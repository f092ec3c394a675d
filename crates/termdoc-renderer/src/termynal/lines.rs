//! Termynal transcript lines.
//!
//! Content is a YAML list. Each entry is a record with keys from
//! [`LineField`], a bare string (`{value: s}`) or null (blank line).

use std::collections::{BTreeMap, BTreeSet};

use serde_yaml::{Mapping, Value};

use super::schema::{Constraint, LineField};
use crate::error::{FormatError, Result, SchemaError};

/// Kind of a termynal line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineType {
    /// Plain output, rendered immediately.
    #[default]
    Output,
    /// Typed-in command.
    Input,
    /// Animated progress bar.
    Progress,
}

impl LineType {
    /// Value of the `data-ty` attribute.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Output => "",
            Self::Input => "input",
            Self::Progress => "progress",
        }
    }

    fn from_checked(value: &str) -> Self {
        match value {
            "input" => Self::Input,
            "progress" => Self::Progress,
            _ => Self::Output,
        }
    }
}

/// One validated line of an animated transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptLine {
    /// Line kind (`type` key, empty when absent or null).
    pub kind: LineType,
    /// Text payload (`value` key, empty when absent or null).
    pub value: String,
    /// Remaining fields, stringified, keyed in schema order.
    pub attributes: BTreeMap<LineField, String>,
}

impl TranscriptLine {
    /// Line with only a text payload.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Validate one record.
    ///
    /// Null fields count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidLineKeys`] listing every key outside the
    /// schema, or [`SchemaError::InvalidLineField`] for the first field that
    /// fails its constraint.
    pub fn from_mapping(record: &Mapping) -> Result<Self, SchemaError> {
        let invalid: BTreeSet<String> = record
            .keys()
            .map(key_text)
            .filter(|key| LineField::from_key(key).is_none())
            .collect();
        if !invalid.is_empty() {
            return Err(SchemaError::InvalidLineKeys { keys: invalid });
        }

        let mut line = Self::default();
        for field in LineField::ALL {
            let Some(value) = record.get(field.key()).filter(|v| !v.is_null()) else {
                continue;
            };
            let constraint = field.constraint();
            let checked = constraint
                .check_yaml(value)
                .ok_or_else(|| invalid_field(field, constraint, value))?;
            match field {
                LineField::Value => line.value = checked,
                LineField::Type => line.kind = LineType::from_checked(&checked),
                _ => {
                    line.attributes.insert(field, checked);
                }
            }
        }
        Ok(line)
    }

    /// `(attribute, value)` pairs of the optional fields in schema order.
    pub fn attributes(&self) -> impl Iterator<Item = (String, &str)> {
        self.attributes
            .iter()
            .map(|(field, value)| (field.attribute(), value.as_str()))
    }
}

/// Parse and validate the content of an animated box.
///
/// Empty or whitespace-only content yields no lines.
///
/// # Errors
///
/// Returns [`FormatError`] when the YAML does not parse, and
/// [`SchemaError`] when the structure or a record is invalid.
pub fn parse_lines(id: &str, content: &str) -> Result<Vec<TranscriptLine>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let document: Value = serde_yaml::from_str(content).map_err(|source| FormatError {
        id: id.to_owned(),
        source,
    })?;

    let entries = match document {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(entries) => entries,
        other => {
            return Err(SchemaError::NotAList {
                found: kind_of(&other),
            }
            .into());
        }
    };

    let mut lines = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let line = match entry {
            Value::Null => TranscriptLine::default(),
            Value::String(value) => TranscriptLine::text(value.as_str()),
            Value::Mapping(record) => TranscriptLine::from_mapping(record)?,
            other => {
                return Err(SchemaError::InvalidLineEntry {
                    index,
                    found: kind_of(other),
                }
                .into());
            }
        };
        lines.push(line);
    }

    tracing::debug!(id, lines = lines.len(), "Parsed termynal lines");
    Ok(lines)
}

fn invalid_field(field: LineField, expected: Constraint, value: &Value) -> SchemaError {
    SchemaError::InvalidLineField {
        field: field.key(),
        expected,
        value: render_yaml(value),
    }
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => render_yaml(other),
    }
}

fn render_yaml(value: &Value) -> String {
    serde_yaml::to_string(value).map_or_else(
        |_| format!("{value:?}"),
        |text| text.trim_end().to_owned(),
    )
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_string_and_null_entries() {
        let lines = parse_lines(
            "termynal:demo",
            "- value: \"hi\"\n  type: input\n- null\n- just text",
        )
        .unwrap();

        assert_eq!(
            lines,
            vec![
                TranscriptLine {
                    kind: LineType::Input,
                    value: "hi".to_owned(),
                    attributes: BTreeMap::new(),
                },
                TranscriptLine::default(),
                TranscriptLine::text("just text"),
            ]
        );
        assert_eq!(lines[1].kind.as_str(), "");
    }

    #[test]
    fn test_empty_list_entry_is_blank_line() {
        let lines = parse_lines("termynal:demo", "-\n- ok").unwrap();
        assert_eq!(lines, vec![TranscriptLine::default(), TranscriptLine::text("ok")]);
    }

    #[test]
    fn test_optional_fields_become_attributes() {
        let content = "- type: progress\n  progressPercent: 80\n  progressChar: '#'\n- value: pip install termdoc\n  type: input\n  prompt: '>>>'\n  typeDelay: 40\n  cursor: _";
        let lines = parse_lines("termynal:demo", content).unwrap();

        assert_eq!(lines[0].kind, LineType::Progress);
        assert_eq!(
            lines[0].attributes().collect::<Vec<_>>(),
            vec![
                ("data-ty-progresspercent".to_owned(), "80"),
                ("data-ty-progresschar".to_owned(), "#"),
            ]
        );
        assert_eq!(lines[1].value, "pip install termdoc");
        assert_eq!(
            lines[1].attributes().collect::<Vec<_>>(),
            vec![
                ("data-ty-prompt".to_owned(), ">>>"),
                ("data-ty-typedelay".to_owned(), "40"),
                ("data-ty-cursor".to_owned(), "_"),
            ]
        );
    }

    #[test]
    fn test_null_fields_are_absent() {
        let lines = parse_lines("termynal:demo", "- value: ~\n  type: ~\n  prompt: ~").unwrap();
        assert_eq!(lines, vec![TranscriptLine::default()]);
    }

    #[test]
    fn test_unknown_key_lists_key_set() {
        let err = parse_lines("termynal:demo", "- value: hi\n  bogus: 1").unwrap_err();
        let crate::Error::Schema(SchemaError::InvalidLineKeys { keys }) = &err else {
            panic!("expected invalid keys, got {err:?}");
        };
        assert_eq!(keys, &BTreeSet::from(["bogus".to_owned()]));
        assert!(err.to_string().contains(r#"{"bogus"}"#));
    }

    #[test]
    fn test_progress_percent_bounds() {
        assert!(parse_lines("termynal:demo", "- progressPercent: 0").is_ok());

        let err = parse_lines("termynal:demo", "- progressPercent: -1").unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Schema(SchemaError::InvalidLineField {
                field: "progressPercent",
                expected: Constraint::NonNegativeInteger,
                ..
            })
        ));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_invalid_type() {
        let err = parse_lines("termynal:demo", "- type: output").unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Schema(SchemaError::InvalidLineField { field: "type", .. })
        ));
    }

    #[test]
    fn test_non_string_value() {
        let err = parse_lines("termynal:demo", "- value: [a, b]").unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Schema(SchemaError::InvalidLineField { field: "value", .. })
        ));
    }

    #[test]
    fn test_malformed_yaml_is_format_error() {
        let err = parse_lines("termynal:demo", "- value: [unclosed").unwrap_err();
        let crate::Error::Format(format_err) = &err else {
            panic!("expected format error, got {err:?}");
        };
        assert_eq!(format_err.id, "termynal:demo");
        assert!(err.to_string().starts_with("Invalid termynal content YAML format (termynal:demo)"));
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_lines("termynal:demo", "").unwrap().is_empty());
        assert!(parse_lines("termynal:demo", "  \n\t").unwrap().is_empty());
    }

    #[test]
    fn test_top_level_mapping_rejected() {
        let err = parse_lines("termynal:demo", "value: hi").unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Schema(SchemaError::NotAList { found: "a mapping" })
        ));
    }

    #[test]
    fn test_number_entry_rejected() {
        let err = parse_lines("termynal:demo", "- ok\n- 42").unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Schema(SchemaError::InvalidLineEntry { index: 1, .. })
        ));
    }
}

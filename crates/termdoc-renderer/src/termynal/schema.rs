//! Closed schema of animated box options and line fields.
//!
//! Every option and field is a (name, constraint) pair checked by the same
//! [`Constraint`] rules, whether the value comes from a directive option
//! string or from the YAML transcript.

use std::collections::BTreeMap;
use std::fmt;

use serde_yaml::Value;

use crate::directive::DirectiveArgs;
use crate::error::SchemaError;
use crate::transcript::TranscriptFormat;

/// Type/range class of an option or field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Any string.
    Text,
    /// Digits only (`0` allowed).
    NonNegativeInteger,
    /// Digits only, at least `1`.
    PositiveInteger,
    /// `true` or `false` (case insensitive), or empty.
    Boolean,
    /// `""`, `input` or `progress`.
    LineType,
}

impl Constraint {
    /// Check an option string, returning the value to store.
    ///
    /// Integers are kept as the literal digit string; booleans are
    /// normalized to `"true"`/`"false"`. An empty value (a bare `noInit`
    /// flag) means `"false"`: the flag alone leaves auto-initialisation on,
    /// unlike directive hosts where a valueless flag reads as `"true"`.
    #[must_use]
    pub fn check_str(self, value: &str) -> Option<String> {
        match self {
            Self::Text => Some(value.to_owned()),
            Self::NonNegativeInteger => is_digits(value).then(|| value.to_owned()),
            Self::PositiveInteger => (is_digits(value)
                && !value.trim_start_matches('0').is_empty())
            .then(|| value.to_owned()),
            Self::Boolean => match value.to_lowercase().as_str() {
                "true" => Some("true".to_owned()),
                "false" | "" => Some("false".to_owned()),
                _ => None,
            },
            Self::LineType => matches!(value, "" | "input" | "progress").then(|| value.to_owned()),
        }
    }

    /// Check a YAML value, returning its attribute string.
    ///
    /// Integer constraints accept YAML integers only; quoted digits are
    /// strings, not numbers.
    #[must_use]
    pub fn check_yaml(self, value: &Value) -> Option<String> {
        match (self, value) {
            (Self::NonNegativeInteger, Value::Number(n)) => n.as_u64().map(|n| n.to_string()),
            (Self::PositiveInteger, Value::Number(n)) => {
                n.as_u64().filter(|&n| n >= 1).map(|n| n.to_string())
            }
            (Self::Boolean, Value::Bool(b)) => Some(b.to_string()),
            (Self::Text | Self::Boolean | Self::LineType, Value::String(s)) => self.check_str(s),
            _ => None,
        }
    }
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "string",
            Self::NonNegativeInteger => "non-negative integer",
            Self::PositiveInteger => "positive integer",
            Self::Boolean => "boolean",
            Self::LineType => "line type (empty, input or progress)",
        })
    }
}

/// Animated box option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BoxOption {
    /// Prefix used for data attributes.
    Prefix,
    /// Delay before the animation starts (ms).
    StartDelay,
    /// Delay between typed characters (ms).
    TypeDelay,
    /// Delay between lines (ms).
    LineDelay,
    /// Number of characters in a progress bar.
    ProgressLength,
    /// Character used for progress bars.
    ProgressChar,
    /// Character used for the cursor.
    Cursor,
    /// Leave initialisation to an explicit `Termynal.init()` call.
    NoInit,
    /// Lines loaded dynamically at instantiation.
    LineData,
}

impl BoxOption {
    /// All options in attribute order.
    pub const ALL: [Self; 9] = [
        Self::Prefix,
        Self::StartDelay,
        Self::TypeDelay,
        Self::LineDelay,
        Self::ProgressLength,
        Self::ProgressChar,
        Self::Cursor,
        Self::NoInit,
        Self::LineData,
    ];

    /// Option name as written in the directive.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::StartDelay => "startDelay",
            Self::TypeDelay => "typeDelay",
            Self::LineDelay => "lineDelay",
            Self::ProgressLength => "progressLength",
            Self::ProgressChar => "progressChar",
            Self::Cursor => "cursor",
            Self::NoInit => "noInit",
            Self::LineData => "lineData",
        }
    }

    #[must_use]
    pub fn constraint(self) -> Constraint {
        match self {
            Self::Prefix | Self::ProgressChar | Self::Cursor | Self::LineData => Constraint::Text,
            Self::StartDelay | Self::TypeDelay | Self::LineDelay => Constraint::NonNegativeInteger,
            Self::ProgressLength => Constraint::PositiveInteger,
            Self::NoInit => Constraint::Boolean,
        }
    }

    /// HTML attribute carrying the option: `data-ty-` + lowercase name.
    #[must_use]
    pub fn attribute(self) -> String {
        format!("data-ty-{}", self.name().to_lowercase())
    }

    /// Look up an option by its directive name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.name() == name)
    }
}

/// Validated animated box options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxOptions(BTreeMap<BoxOption, String>);

impl BoxOptions {
    /// Validate every option of a directive.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownOption`] for names outside the schema
    /// (including `#id` and `.class` shorthands) and
    /// [`SchemaError::InvalidOption`] for values failing their constraint.
    pub fn from_args(args: &DirectiveArgs) -> Result<Self, SchemaError> {
        if let Some(option) = args
            .option_names()
            .into_iter()
            .find(|name| BoxOption::from_name(name).is_none())
        {
            return Err(SchemaError::UnknownOption {
                directive: TranscriptFormat::Termynal,
                option,
            });
        }

        let mut options = BTreeMap::new();
        for (name, value) in &args.attrs {
            let Some(option) = BoxOption::from_name(name) else {
                continue;
            };
            let constraint = option.constraint();
            let normalized = constraint
                .check_str(value)
                .ok_or_else(|| SchemaError::InvalidOption {
                    option: option.name(),
                    expected: constraint,
                    value: value.clone(),
                })?;
            options.insert(option, normalized);
        }
        Ok(Self(options))
    }

    /// Stored value of one option.
    #[must_use]
    pub fn get(&self, option: BoxOption) -> Option<&str> {
        self.0.get(&option).map(String::as_str)
    }

    /// `(attribute, value)` pairs in schema order.
    pub fn attributes(&self) -> impl Iterator<Item = (String, &str)> {
        self.0
            .iter()
            .map(|(option, value)| (option.attribute(), value.as_str()))
    }
}

/// Field of a termynal line record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LineField {
    /// Text payload of the line.
    Value,
    /// Line kind.
    Type,
    /// Prompt shown before input lines.
    Prompt,
    /// Percentage a progress bar stops at.
    ProgressPercent,
    /// Character used for this line's progress bar.
    ProgressChar,
    /// Typing delay for this line (ms).
    TypeDelay,
    /// Cursor for this line.
    Cursor,
}

impl LineField {
    /// All fields in record order.
    pub const ALL: [Self; 7] = [
        Self::Value,
        Self::Type,
        Self::Prompt,
        Self::ProgressPercent,
        Self::ProgressChar,
        Self::TypeDelay,
        Self::Cursor,
    ];

    /// Key as written in the YAML record.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Type => "type",
            Self::Prompt => "prompt",
            Self::ProgressPercent => "progressPercent",
            Self::ProgressChar => "progressChar",
            Self::TypeDelay => "typeDelay",
            Self::Cursor => "cursor",
        }
    }

    #[must_use]
    pub fn constraint(self) -> Constraint {
        match self {
            Self::Value | Self::Prompt | Self::ProgressChar | Self::Cursor => Constraint::Text,
            Self::Type => Constraint::LineType,
            Self::ProgressPercent | Self::TypeDelay => Constraint::NonNegativeInteger,
        }
    }

    /// HTML attribute carrying the field: `data-ty-` + lowercase key.
    #[must_use]
    pub fn attribute(self) -> String {
        format!("data-ty-{}", self.key().to_lowercase())
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

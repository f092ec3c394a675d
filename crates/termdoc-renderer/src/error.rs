//! Error types for transcript directives.
//!
//! Every failure aborts the build of the document being processed; nothing
//! here is recovered from.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::termynal::Constraint;
use crate::transcript::TranscriptFormat;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any error raised while evaluating or post-processing transcript directives.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed directive arguments, options or line fields.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// Required build-wide setting missing.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Missing directory or transcript file.
    #[error(transparent)]
    Resource(#[from] ResourceError),
    /// Transcript content does not parse.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// Post-construction structural assertion failed.
    #[error(transparent)]
    Internal(#[from] InvariantError),
}

/// Malformed directive arguments, options or record fields.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The directive takes exactly one argument.
    #[error(
        "The {directive} directive expects just one argument (the terminal box id), found {found}."
    )]
    ArgumentCount {
        /// Directive being evaluated.
        directive: TranscriptFormat,
        /// Number of arguments supplied.
        found: usize,
    },
    /// Identifier lacks the format prefix.
    #[error("The terminal box label ({id}) must start with the \"{prefix}\" prefix.")]
    MissingPrefix {
        /// Offending identifier.
        id: String,
        /// Required prefix.
        prefix: &'static str,
    },
    /// Identifier carries the transcript file extension.
    #[error("The terminal box label ({id}) must not end with the \"{extension}\" extension.")]
    ForbiddenExtension {
        /// Offending identifier.
        id: String,
        /// Forbidden extension.
        extension: &'static str,
    },
    /// Option not recognised by the directive.
    #[error("The {directive} directive does not accept the *{option}* option.")]
    UnknownOption {
        /// Directive being evaluated.
        directive: TranscriptFormat,
        /// Option as written.
        option: String,
    },
    /// Box option failed its constraint.
    #[error("The *{option}* parameter should be a {expected}, got {value:?}.")]
    InvalidOption {
        /// Option name.
        option: &'static str,
        /// Constraint the value violates.
        expected: Constraint,
        /// Value as written.
        value: String,
    },
    /// Line record carries keys outside the schema.
    #[error("The following termynal line keys are invalid: {}.", key_set(.keys))]
    InvalidLineKeys {
        /// Unrecognised keys.
        keys: BTreeSet<String>,
    },
    /// Line field failed its constraint.
    #[error("The *{field}* key of a termynal line must be a {expected}, got {value}.")]
    InvalidLineField {
        /// Field name.
        field: &'static str,
        /// Constraint the value violates.
        expected: Constraint,
        /// Offending value rendered as YAML.
        value: String,
    },
    /// Termynal content is not a list.
    #[error("Termynal content must be a list of lines, found {found}.")]
    NotAList {
        /// Kind of value found instead.
        found: &'static str,
    },
    /// List entry is neither a mapping, a string nor empty.
    #[error("Termynal line {index} must be a mapping, a string or empty, found {found}.")]
    InvalidLineEntry {
        /// Zero-based position in the list.
        index: usize,
        /// Kind of value found instead.
        found: &'static str,
    },
    /// Container directive without its closing fence.
    #[error("line {line}: unclosed {directive} directive (missing closing :::)")]
    UnclosedDirective {
        /// Directive name.
        directive: String,
        /// Line of the opening fence (1-indexed).
        line: usize,
    },
}

/// Renders a key set the way it is reported to authors: `{"a", "b"}`.
fn key_set(keys: &BTreeSet<String>) -> String {
    let quoted: Vec<String> = keys.iter().map(|k| format!("{k:?}")).collect();
    format!("{{{}}}", quoted.join(", "))
}

/// File loading was requested but the directory setting is absent.
#[derive(Debug, thiserror::Error)]
#[error("The {setting} setting must be set when loading {content} from a file.")]
pub struct ConfigError {
    /// Name of the missing setting.
    pub setting: &'static str,
    /// What was being loaded.
    pub content: &'static str,
}

/// Missing transcript directory or file.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// Configured directory does not exist.
    #[error("The {setting} directory ({}) does not exist.", .path.display())]
    MissingDirectory {
        /// Setting naming the directory.
        setting: &'static str,
        /// Localised directory path.
        path: PathBuf,
    },
    /// Transcript file does not exist.
    #[error("The transcript file ({}) does not exist.", .path.display())]
    MissingFile {
        /// Composed file path.
        path: PathBuf,
    },
    /// Path exists but is not a regular file.
    #[error("The transcript file ({}) is not a file.", .path.display())]
    NotAFile {
        /// Composed file path.
        path: PathBuf,
    },
    /// File could not be read.
    #[error("Failed to read transcript file ({}): {source}", .path.display())]
    Read {
        /// Composed file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Animated transcript content is not valid YAML.
#[derive(Debug, thiserror::Error)]
#[error("Invalid termynal content YAML format ({id}): {source}")]
pub struct FormatError {
    /// Transcript identifier.
    pub id: String,
    /// Parser error carrying position and message.
    pub source: serde_yaml::Error,
}

/// Structural assertion over a built tree failed.
#[derive(Debug, thiserror::Error)]
pub enum InvariantError {
    /// Container node must carry exactly one name.
    #[error("Terminal box must have exactly one name, found {found}.")]
    NameCount {
        /// Number of names.
        found: usize,
    },
    /// Container node must carry exactly one id.
    #[error("Terminal box {name} must have exactly one id, found {found}.")]
    IdCount {
        /// Box name.
        name: String,
        /// Number of ids.
        found: usize,
    },
    /// Container name lacks its format prefix.
    #[error("Terminal box name {name} must start with {prefix}.")]
    UnexpectedName {
        /// Box name.
        name: String,
        /// Required prefix.
        prefix: &'static str,
    },
    /// Anonymous label missing or pointing elsewhere.
    #[error("Terminal box {name} is not registered as an anonymous label for ({docname}, {id}).")]
    MissingAnonymousLabel {
        /// Box name.
        name: String,
        /// Document holding the box.
        docname: String,
        /// Box id.
        id: String,
    },
    /// Termynal line outside of a termynal box.
    #[error("Each termynal line must be embedded within a termynal box, found parent {parent}.")]
    OrphanLine {
        /// Kind of the actual parent.
        parent: &'static str,
    },
    /// Termynal box must carry exactly one `termynal-` id for activation.
    #[error("Termynal box must have exactly one termynal id, found {found}.")]
    ActivationId {
        /// Number of matching ids.
        found: usize,
    },
}

//! Transcript formats and identifiers.

use std::fmt;

use crate::error::SchemaError;

/// The two transcript formats handled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptFormat {
    /// Static box: plain-text transcript styled by `cssterm`.
    Cssterm,
    /// Animated box: YAML list of lines animated by `termynal`.
    Termynal,
}

impl TranscriptFormat {
    /// Directive name, also the identifier prefix without the colon.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cssterm => "cssterm",
            Self::Termynal => "termynal",
        }
    }

    /// Required identifier prefix.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Cssterm => "cssterm:",
            Self::Termynal => "termynal:",
        }
    }

    /// Transcript file extension (forbidden in identifiers).
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Cssterm => ".log",
            Self::Termynal => ".yml",
        }
    }

    /// Name of the configuration setting holding the transcript directory.
    #[must_use]
    pub fn dir_setting(self) -> &'static str {
        match self {
            Self::Cssterm => "cssterm.dir",
            Self::Termynal => "termynal.dir",
        }
    }

    /// Human description of the loaded content, used in error messages.
    #[must_use]
    pub fn content_label(self) -> &'static str {
        match self {
            Self::Cssterm => "cssterm box content",
            Self::Termynal => "termynal box content",
        }
    }
}

impl fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated transcript identifier, e.g. `termynal:install`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptId {
    format: TranscriptFormat,
    raw: String,
}

impl TranscriptId {
    /// Validate an identifier against its format.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingPrefix`] or [`SchemaError::ForbiddenExtension`].
    pub fn parse(format: TranscriptFormat, raw: &str) -> Result<Self, SchemaError> {
        if !raw.starts_with(format.prefix()) {
            return Err(SchemaError::MissingPrefix {
                id: raw.to_owned(),
                prefix: format.prefix(),
            });
        }
        if raw.ends_with(format.extension()) {
            return Err(SchemaError::ForbiddenExtension {
                id: raw.to_owned(),
                extension: format.extension(),
            });
        }
        Ok(Self {
            format,
            raw: raw.to_owned(),
        })
    }

    /// The identifier as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Format owning this identifier.
    #[must_use]
    pub fn format(&self) -> TranscriptFormat {
        self.format
    }

    /// Transcript file name: prefix stripped, extension appended.
    #[must_use]
    pub fn file_name(&self) -> String {
        let stem = &self.raw[self.format.prefix().len()..];
        format!("{stem}{}", self.format.extension())
    }

    /// Id of the container node built for this transcript.
    #[must_use]
    pub fn box_id(&self) -> String {
        format!("{}-box", make_id(&self.raw))
    }
}

impl fmt::Display for TranscriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Convert a name into a valid HTML id.
///
/// Non-ASCII letters are transliterated to ASCII first, then the name is
/// lowercased, every run of characters outside `[a-z0-9]` collapses into a
/// single hyphen, and leading digits/hyphens and trailing hyphens are dropped.
///
/// # Example
///
/// ```
/// use termdoc_renderer::make_id;
///
/// assert_eq!(make_id("termynal:Install Steps"), "termynal-install-steps");
/// assert_eq!(make_id("cssterm:1.2.3"), "cssterm-1-2-3");
/// assert_eq!(make_id("termynal:café"), "termynal-cafe");
/// ```
#[must_use]
pub fn make_id(name: &str) -> String {
    slug::slugify(name)
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '-')
        .to_owned()
}

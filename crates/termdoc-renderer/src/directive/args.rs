//! Directive argument parsing.
//!
//! Parses the `[argument]{#id .class key="value"}` part of a directive line.

use std::collections::BTreeMap;

/// Parsed arguments from directive syntax.
///
/// Represents the argument text and options extracted from
/// `::name[argument]{key="value"}`.
///
/// # Example
///
/// ```
/// use termdoc_renderer::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("termynal:demo", r#"startDelay=600 prefix="ty""#);
/// assert_eq!(args.arguments(), vec!["termynal:demo"]);
/// assert_eq!(args.get("startDelay"), Some("600"));
/// assert_eq!(args.get("prefix"), Some("ty"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Raw text from brackets: `[argument]` (empty string if not provided).
    pub content: String,
    /// ID from attributes: `{#id}`.
    pub id: Option<String>,
    /// Classes from attributes: `{.class1 .class2}`.
    pub classes: Vec<String>,
    /// Key-value options: `{key="value"}`.
    pub attrs: BTreeMap<String, String>,
}

impl DirectiveArgs {
    /// Parse bracket content and attributes string into structured arguments.
    ///
    /// # Arguments
    ///
    /// * `content` - The content from brackets `[content]`
    /// * `attrs_str` - The attributes string from braces `{...}` (without braces)
    #[must_use]
    pub fn parse(content: &str, attrs_str: &str) -> Self {
        let mut args = Self {
            content: content.to_owned(),
            ..Default::default()
        };

        let mut remaining = attrs_str.trim();

        while !remaining.is_empty() {
            remaining = remaining.trim_start();

            if let Some(rest) = remaining.strip_prefix('#') {
                let end = token_end(rest);
                args.id = Some(rest[..end].to_owned());
                remaining = &rest[end..];
            } else if let Some(rest) = remaining.strip_prefix('.') {
                let end = token_end(rest);
                args.classes.push(rest[..end].to_owned());
                remaining = &rest[end..];
            } else if let Some((key, value, rest)) = parse_key_value(remaining) {
                args.attrs.insert(key.to_owned(), value.to_owned());
                remaining = rest;
            } else {
                // Bare word without a value: an option given as a flag
                let end = remaining
                    .find(char::is_whitespace)
                    .unwrap_or(remaining.len());
                if end == 0 {
                    remaining = &remaining[remaining.chars().next().map_or(0, char::len_utf8)..];
                } else {
                    args.attrs.insert(remaining[..end].to_owned(), String::new());
                    remaining = &remaining[end..];
                }
            }
        }

        args
    }

    /// Whitespace-separated arguments from the bracket content.
    #[must_use]
    pub fn arguments(&self) -> Vec<&str> {
        self.content.split_whitespace().collect()
    }

    /// Get an option value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Every option name as written, with `#id` and `.class` shorthands
    /// reported in their source form.
    #[must_use]
    pub fn option_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.attrs.keys().cloned().collect();
        if let Some(id) = &self.id {
            names.push(format!("#{id}"));
        }
        names.extend(self.classes.iter().map(|class| format!(".{class}")));
        names
    }
}

fn token_end(s: &str) -> usize {
    s.find(|c: char| c.is_whitespace() || c == '.' || c == '#')
        .unwrap_or(s.len())
}

/// Parse a key-value pair from the attributes string.
///
/// Supports: `key="value"`, `key='value'`, `key=value`
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let eq_pos = s.find('=')?;
    let key = &s[..eq_pos];

    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }

    let after_eq = &s[eq_pos + 1..];

    if let Some(stripped) = after_eq.strip_prefix('"') {
        let end_quote = stripped.find('"')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else if let Some(stripped) = after_eq.strip_prefix('\'') {
        let end_quote = stripped.find('\'')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else {
        let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
        Some((key, &after_eq[..end], &after_eq[end..]))
    }
}

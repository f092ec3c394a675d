//! Directive line parsing.
//!
//! Transcript directives are block-level, so only whole lines are parsed:
//! `::name[content]{attrs}` (leaf), `:::name[content]{attrs}` (container
//! opening) and a bare run of colons (container closing).

use super::DirectiveArgs;

/// Parsed directive from a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedDirective {
    /// Leaf directive: `::name[content]{attrs}`
    Leaf { name: String, args: DirectiveArgs },
    /// Container opening: `:::name[content]{attrs}`
    ContainerStart {
        name: String,
        args: DirectiveArgs,
        colon_count: usize,
    },
    /// Container closing: `:::`
    ContainerEnd { colon_count: usize },
}

/// Parse a whole line as a directive.
///
/// Returns `None` for ordinary Markdown lines, including lines with text
/// after the attribute braces.
pub(crate) fn parse_line(line: &str) -> Option<ParsedDirective> {
    let trimmed = line.trim();
    let colon_count = trimmed.chars().take_while(|&c| c == ':').count();
    if colon_count < 2 {
        return None;
    }

    let after_colons = &trimmed[colon_count..];
    if after_colons.trim().is_empty() {
        return (colon_count >= 3).then_some(ParsedDirective::ContainerEnd { colon_count });
    }

    let name_end = after_colons
        .find(|c: char| c == '[' || c == '{' || c.is_whitespace())
        .unwrap_or(after_colons.len());
    let name = &after_colons[..name_end];
    if !is_valid_directive_name(name) {
        return None;
    }

    let rest = after_colons[name_end..].trim_start();
    let (content, content_consumed) = parse_delimited(rest, '[', ']');
    let rest = &rest[content_consumed..];
    let (attrs, attrs_consumed) = parse_delimited(rest, '{', '}');
    if !rest[attrs_consumed..].trim().is_empty() {
        return None;
    }

    let name = name.to_owned();
    let args = DirectiveArgs::parse(content, attrs);
    Some(if colon_count == 2 {
        ParsedDirective::Leaf { name, args }
    } else {
        ParsedDirective::ContainerStart {
            name,
            args,
            colon_count,
        }
    })
}

/// Valid names contain only alphanumeric characters, hyphens, and underscores.
fn is_valid_directive_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Parse a balanced `open ... close` group at the start of `s`.
///
/// Returns the inner text and the number of bytes consumed, or an empty
/// string and zero when `s` does not start with a complete group.
fn parse_delimited(s: &str, open: char, close: char) -> (&str, usize) {
    if !s.starts_with(open) {
        return ("", 0);
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return (&s[open.len_utf8()..i], i + close.len_utf8());
            }
        }
    }
    ("", 0)
}

//! Document scanning.
//!
//! Splits a Markdown source into plain Markdown blocks and invocations of
//! registered directives. Unknown directives and anything inside fenced
//! code blocks stay in the Markdown untouched.

use super::DirectiveArgs;
use super::fence::FenceTracker;
use super::parser::{ParsedDirective, parse_line};
use crate::error::SchemaError;

/// One occurrence of a registered directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Directive name.
    pub name: String,
    /// Bracket argument and brace options.
    pub args: DirectiveArgs,
    /// Container body lines; `None` for the leaf form.
    pub body: Option<Vec<String>>,
    /// Line of the directive (1-indexed).
    pub line: usize,
}

/// A scanned piece of a document, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Markdown text between directives.
    Markdown(String),
    /// Registered directive.
    Directive(Invocation),
}

/// Scan `source` for invocations of the directives named in `known`.
///
/// A container body runs until a closing line with at least as many colons
/// as the opening one.
///
/// # Errors
///
/// Returns [`SchemaError::UnclosedDirective`] when a container body reaches
/// the end of the document.
pub fn scan(source: &str, known: &[&str]) -> Result<Vec<Block>, SchemaError> {
    let mut blocks = Vec::new();
    let mut markdown = String::new();
    let mut fence = FenceTracker::new();
    let mut lines = source.lines().enumerate();

    while let Some((idx, line)) = lines.next() {
        let line_num = idx + 1;
        let is_marker = fence.update(line);
        if is_marker || fence.in_fence() {
            push_line(&mut markdown, line);
            continue;
        }

        match parse_line(line) {
            Some(ParsedDirective::Leaf { name, args }) if known.contains(&name.as_str()) => {
                flush(&mut blocks, &mut markdown);
                blocks.push(Block::Directive(Invocation {
                    name,
                    args,
                    body: None,
                    line: line_num,
                }));
            }
            Some(ParsedDirective::ContainerStart {
                name,
                args,
                colon_count,
            }) if known.contains(&name.as_str()) => {
                let mut body = Vec::new();
                let mut closed = false;
                for (_, body_line) in lines.by_ref() {
                    if matches!(
                        parse_line(body_line),
                        Some(ParsedDirective::ContainerEnd { colon_count: n }) if n >= colon_count
                    ) {
                        closed = true;
                        break;
                    }
                    body.push(body_line.to_owned());
                }
                if !closed {
                    return Err(SchemaError::UnclosedDirective {
                        directive: name,
                        line: line_num,
                    });
                }

                flush(&mut blocks, &mut markdown);
                blocks.push(Block::Directive(Invocation {
                    name,
                    args,
                    body: Some(body),
                    line: line_num,
                }));
            }
            _ => push_line(&mut markdown, line),
        }
    }

    flush(&mut blocks, &mut markdown);
    Ok(blocks)
}

fn push_line(markdown: &mut String, line: &str) {
    markdown.push_str(line);
    markdown.push('\n');
}

fn flush(blocks: &mut Vec<Block>, markdown: &mut String) {
    if !markdown.trim().is_empty() {
        blocks.push(Block::Markdown(std::mem::take(markdown)));
    }
    markdown.clear();
}

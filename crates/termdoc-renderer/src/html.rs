//! HTML output.
//!
//! Markdown blocks go through pulldown-cmark; transcript nodes are written
//! directly with every text and attribute value escaped. Raw nodes are
//! emitted verbatim.

use std::fmt::Write;

use pulldown_cmark::{Options, Parser};

use crate::pipeline::Page;
use crate::tree::{Document, Node};
use crate::util::{escape_html, relative_path};

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
}

/// Render a document tree to an HTML fragment.
#[must_use]
pub fn render_document(doc: &Document) -> String {
    let mut out = String::new();
    for node in &doc.children {
        render_node(node, &mut out);
    }
    out
}

fn render_node(node: &Node, out: &mut String) {
    match node {
        Node::Markdown(text) => {
            pulldown_cmark::html::push_html(out, Parser::new_ext(text, markdown_options()));
        }
        Node::Raw(html) => out.push_str(html),
        Node::Section { ids, children } => {
            out.push_str("<section");
            push_id(out, ids);
            out.push_str(">\n");
            for child in children {
                render_node(child, out);
            }
            out.push_str("</section>\n");
        }
        Node::StaticBox(static_box) => {
            out.push_str("<div class=\"cssterm\"");
            push_id(out, &static_box.ids);
            let _ = writeln!(out, ">{}</div>", escape_html(&static_box.raw));
        }
        Node::AnimatedBox(animated) => {
            out.push_str("<div");
            push_id(out, &animated.ids);
            out.push_str(" data-termynal=\"\"");
            for (name, value) in animated.options.attributes() {
                push_attr(out, &name, value);
            }
            out.push_str(">\n");
            for child in &animated.children {
                render_node(child, out);
            }
            out.push_str("</div>\n");
        }
        Node::AnimatedLine(line) => {
            out.push_str("<span");
            push_attr(out, "data-ty", line.kind.as_str());
            for (name, value) in line.attributes() {
                push_attr(out, &name, value);
            }
            let _ = writeln!(out, ">{}</span>", escape_html(&line.value));
        }
    }
}

fn push_id(out: &mut String, ids: &[String]) {
    if !ids.is_empty() {
        push_attr(out, "id", &ids.join(" "));
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {name}=\"{}\"", escape_html(value));
}

/// Render a complete HTML page with its own assets linked.
///
/// Only the files attached by
/// [`on_page_rendered`](crate::TermPipeline::on_page_rendered) are linked.
/// Local assets resolve to `_static/<file>` relative to the page; URLs are
/// linked as-is.
#[must_use]
pub fn render_page(page: &Page) -> String {
    let asset_url = |file: &str| {
        if file.contains("://") {
            file.to_owned()
        } else {
            relative_path(&page.name, &format!("_static/{file}"))
        }
    };

    let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_html(&page.name));
    for file in &page.css_files {
        let _ = writeln!(
            out,
            "<link rel=\"stylesheet\" href=\"{}\">",
            escape_html(&asset_url(file))
        );
    }
    for file in page.script_files.iter().chain(&page.js_files) {
        let _ = writeln!(out, "<script src=\"{}\"></script>", escape_html(&asset_url(file)));
    }
    out.push_str("</head>\n<body>\n");
    if let Some(doc) = &page.document {
        out.push_str(&render_document(doc));
    }
    out.push_str("</body>\n</html>\n");
    out
}

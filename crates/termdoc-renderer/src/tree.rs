//! Document tree.
//!
//! A parsed document is an ordered list of [`Node`]s. Transcript directives
//! produce container nodes; everything else in the source is kept as
//! Markdown blocks and rendered by the HTML layer.

use std::collections::HashSet;

use crate::termynal::{BoxOptions, TranscriptLine};
use crate::transcript::TranscriptFormat;

/// Static transcript box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticBox {
    /// Node ids (exactly one once built).
    pub ids: Vec<String>,
    /// Reference names (exactly one once built: the identifier).
    pub names: Vec<String>,
    /// Content with trailing newlines stripped; rendered into HTML.
    pub raw: String,
    /// Content with outer whitespace stripped; the box's text value.
    pub display: String,
}

impl StaticBox {
    /// Build a box for `name` holding `raw`.
    #[must_use]
    pub fn new(id: String, name: String, raw: String) -> Self {
        Self {
            ids: vec![id],
            names: vec![name],
            display: raw.trim().to_owned(),
            raw,
        }
    }
}

/// Animated transcript box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatedBox {
    /// Node ids (exactly one once built).
    pub ids: Vec<String>,
    /// Reference names (exactly one once built: the identifier).
    pub names: Vec<String>,
    /// Validated box options.
    pub options: BoxOptions,
    /// Line nodes, in transcript order.
    pub children: Vec<Node>,
}

/// Node of a document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Markdown source passed through to the HTML renderer.
    Markdown(String),
    /// HTML emitted verbatim.
    Raw(String),
    /// Generic grouping element.
    Section {
        /// Node ids.
        ids: Vec<String>,
        /// Child nodes.
        children: Vec<Node>,
    },
    /// `cssterm` box.
    StaticBox(StaticBox),
    /// `termynal` box.
    AnimatedBox(AnimatedBox),
    /// One `termynal` line.
    AnimatedLine(TranscriptLine),
}

impl Node {
    /// Short kind name used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Markdown(_) => "markdown",
            Self::Raw(_) => "raw",
            Self::Section { .. } => "section",
            Self::StaticBox(_) => "cssterm box",
            Self::AnimatedBox(_) => "termynal box",
            Self::AnimatedLine(_) => "termynal line",
        }
    }

    /// Transcript format of a container node.
    #[must_use]
    pub fn format(&self) -> Option<TranscriptFormat> {
        match self {
            Self::StaticBox(_) => Some(TranscriptFormat::Cssterm),
            Self::AnimatedBox(_) => Some(TranscriptFormat::Termynal),
            _ => None,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Section { children, .. } => children,
            Self::AnimatedBox(animated) => &animated.children,
            _ => &[],
        }
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        match self {
            Self::Section { ids, .. } => ids,
            Self::StaticBox(static_box) => &static_box.ids,
            Self::AnimatedBox(animated) => &animated.ids,
            _ => &[],
        }
    }

    fn ids_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            Self::Section { ids, .. } => Some(ids),
            Self::StaticBox(static_box) => Some(&mut static_box.ids),
            Self::AnimatedBox(animated) => Some(&mut animated.ids),
            _ => None,
        }
    }

    /// Reference names of a container node.
    #[must_use]
    pub fn names(&self) -> &[String] {
        match self {
            Self::StaticBox(static_box) => &static_box.names,
            Self::AnimatedBox(animated) => &animated.names,
            _ => &[],
        }
    }

    /// Plain-text value of the node.
    #[must_use]
    pub fn astext(&self) -> String {
        match self {
            Self::Markdown(text) => text.clone(),
            Self::Raw(_) => String::new(),
            Self::StaticBox(static_box) => static_box.display.clone(),
            Self::AnimatedLine(line) => line.value.trim().to_owned(),
            Self::Section { children, .. } | Self::AnimatedBox(AnimatedBox { children, .. }) => {
                children
                    .iter()
                    .map(Self::astext)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    }
}

/// A parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Document name: source path relative to the build root, without
    /// extension, `/`-separated.
    pub docname: String,
    /// Top-level nodes in source order.
    pub children: Vec<Node>,
}

impl Document {
    #[must_use]
    pub fn new(docname: impl Into<String>) -> Self {
        Self {
            docname: docname.into(),
            children: Vec::new(),
        }
    }

    /// Append a node, minting unique ids.
    ///
    /// An id already used in the document gets the first free `-N` suffix.
    pub fn push(&mut self, mut node: Node) {
        let mut taken: HashSet<String> = self
            .traverse()
            .into_iter()
            .flat_map(|(n, _)| n.ids().iter().cloned())
            .collect();
        mint_ids(&mut node, &mut taken, &self.docname);
        self.children.push(node);
    }

    /// Every node with its parent, pre-order in document order.
    ///
    /// Top-level nodes have no parent.
    #[must_use]
    pub fn traverse(&self) -> Vec<(&Node, Option<&Node>)> {
        let mut out = Vec::new();
        let mut stack: Vec<(&Node, Option<&Node>)> =
            self.children.iter().rev().map(|n| (n, None)).collect();
        while let Some((node, parent)) = stack.pop() {
            out.push((node, parent));
            stack.extend(node.children().iter().rev().map(|child| (child, Some(node))));
        }
        out
    }

    /// Container nodes of one format, in document order.
    #[must_use]
    pub fn boxes(&self, format: TranscriptFormat) -> Vec<&Node> {
        self.traverse()
            .into_iter()
            .map(|(node, _)| node)
            .filter(|node| node.format() == Some(format))
            .collect()
    }

    /// Whether the document holds at least one box of `format`.
    #[must_use]
    pub fn has_boxes(&self, format: TranscriptFormat) -> bool {
        self.traverse()
            .into_iter()
            .any(|(node, _)| node.format() == Some(format))
    }
}

fn mint_ids(node: &mut Node, taken: &mut HashSet<String>, docname: &str) {
    if let Some(ids) = node.ids_mut() {
        for id in ids.iter_mut() {
            if taken.contains(id.as_str()) {
                let unique = (1..)
                    .map(|n| format!("{id}-{n}"))
                    .find(|candidate| !taken.contains(candidate))
                    .unwrap_or_default();
                tracing::warn!(docname, id = %id, minted = %unique, "Duplicate node id");
                *id = unique;
            }
            taken.insert(id.clone());
        }
    }

    match node {
        Node::Section { children, .. } | Node::AnimatedBox(AnimatedBox { children, .. }) => {
            for child in children {
                mint_ids(child, taken, docname);
            }
        }
        _ => {}
    }
}

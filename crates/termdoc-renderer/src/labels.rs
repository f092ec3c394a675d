//! Cross-reference label table.
//!
//! Mirrors the two tables a documentation host keeps: anonymous labels
//! (`name → (docname, id)`, seeded for every explicit target) and named
//! labels (`name → (docname, id, title)`). Transcript boxes get a named
//! label with the shared "terminal box" title.

use std::collections::{BTreeMap, HashSet};

use crate::error::InvariantError;
use crate::tree::{Document, Node};

/// Title shared by every transcript box label.
pub const REFERENCE_TITLE: &str = "terminal box";

/// Named label target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub docname: String,
    pub id: String,
    pub title: String,
}

/// Per-build label table.
#[derive(Debug, Default)]
pub struct LabelTable {
    anonymous: BTreeMap<String, (String, String)>,
    named: BTreeMap<String, Label>,
}

impl LabelTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed anonymous labels for every named node of a document.
    ///
    /// A name already claimed by another document is overwritten with a
    /// warning; within one document the first node keeps it.
    pub fn link_targets(&mut self, doc: &Document) {
        for (node, _) in doc.traverse() {
            let Some(id) = node.ids().first() else {
                continue;
            };
            for name in node.names() {
                match self.anonymous.get(name) {
                    Some((previous, _)) if *previous == doc.docname => {
                        tracing::warn!(
                            name = %name,
                            docname = %doc.docname,
                            id = %id,
                            "Duplicate label in document, keeping the first"
                        );
                        continue;
                    }
                    Some((previous, _)) => {
                        tracing::warn!(
                            name = %name,
                            docname = %doc.docname,
                            previous = %previous,
                            "Duplicate label"
                        );
                    }
                    None => {}
                }
                self.anonymous
                    .insert(name.clone(), (doc.docname.clone(), id.clone()));
            }
        }
    }

    /// Add the named label of every transcript box in a document.
    ///
    /// Returns the number of labels written.
    ///
    /// # Errors
    ///
    /// Returns an [`InvariantError`] when a box does not carry exactly one
    /// name and id, its name lacks the format prefix, or its anonymous label
    /// is missing or points elsewhere.
    pub fn register_boxes(&mut self, doc: &Document) -> Result<usize, InvariantError> {
        let mut registered = 0;
        let mut seen = HashSet::new();
        for (node, _) in doc.traverse() {
            let Some(format) = node.format() else {
                continue;
            };
            let (name, id) = box_identity(node)?;
            if !seen.insert(name) {
                continue;
            }
            if !name.starts_with(format.prefix()) {
                return Err(InvariantError::UnexpectedName {
                    name: name.to_owned(),
                    prefix: format.prefix(),
                });
            }

            let expected = (doc.docname.clone(), id.to_owned());
            if self.anonymous.get(name) != Some(&expected) {
                return Err(InvariantError::MissingAnonymousLabel {
                    name: name.to_owned(),
                    docname: doc.docname.clone(),
                    id: id.to_owned(),
                });
            }

            self.named.insert(
                name.to_owned(),
                Label {
                    docname: doc.docname.clone(),
                    id: id.to_owned(),
                    title: REFERENCE_TITLE.to_owned(),
                },
            );
            registered += 1;
        }
        Ok(registered)
    }

    /// Anonymous label target of `name`.
    #[must_use]
    pub fn anonymous(&self, name: &str) -> Option<(&str, &str)> {
        self.anonymous
            .get(name)
            .map(|(docname, id)| (docname.as_str(), id.as_str()))
    }

    /// Named label of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Label> {
        self.named.get(name)
    }

    /// Drop every label pointing into `docname` before it is rebuilt.
    pub fn clear_document(&mut self, docname: &str) {
        self.anonymous.retain(|_, target| target.0 != docname);
        self.named.retain(|_, label| label.docname != docname);
    }
}

fn box_identity(node: &Node) -> Result<(&str, &str), InvariantError> {
    let [name] = node.names() else {
        return Err(InvariantError::NameCount {
            found: node.names().len(),
        });
    };
    let [id] = node.ids() else {
        return Err(InvariantError::IdCount {
            name: name.clone(),
            found: node.ids().len(),
        });
    };
    Ok((name.as_str(), id.as_str()))
}

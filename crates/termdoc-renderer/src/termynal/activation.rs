//! Containment validation and activation script injection.

use crate::error::InvariantError;
use crate::transcript::TranscriptFormat;
use crate::tree::{Document, Node};
use crate::util::relative_path;

/// Client library loaded by the activation script.
pub const ACTIVATION_SCRIPT: &str = "termynal.js";

/// Check that every termynal line sits directly inside a termynal box.
///
/// # Errors
///
/// Returns [`InvariantError::OrphanLine`] naming the offending parent.
pub fn validate_containment(doc: &Document) -> Result<(), InvariantError> {
    for (node, parent) in doc.traverse() {
        if !matches!(node, Node::AnimatedLine(_)) {
            continue;
        }
        match parent {
            Some(Node::AnimatedBox(_)) => {}
            Some(other) => {
                return Err(InvariantError::OrphanLine {
                    parent: other.kind(),
                });
            }
            None => return Err(InvariantError::OrphanLine { parent: "document" }),
        }
    }
    Ok(())
}

/// Build the activation script for a document, if it holds termynal boxes.
///
/// The script binds the client library to every box id, `#`-prefixed and
/// pipe-joined in document order.
///
/// # Errors
///
/// Returns [`InvariantError::ActivationId`] when a box does not carry
/// exactly one `termynal-` id.
pub fn activation_script(doc: &Document) -> Result<Option<String>, InvariantError> {
    let boxes = doc.boxes(TranscriptFormat::Termynal);
    if boxes.is_empty() {
        return Ok(None);
    }

    let mut selectors = Vec::with_capacity(boxes.len());
    for node in boxes {
        let ids: Vec<&String> = node
            .ids()
            .iter()
            .filter(|id| id.starts_with("termynal-"))
            .collect();
        let [id] = ids.as_slice() else {
            return Err(InvariantError::ActivationId { found: ids.len() });
        };
        selectors.push(format!("#{id}"));
    }

    let src = relative_path(&doc.docname, &format!("_static/{ACTIVATION_SCRIPT}"));
    Ok(Some(format!(
        "<script src=\"{src}\" data-termynal-container=\"{}\"></script>\n",
        selectors.join("|")
    )))
}

/// Append the activation script to a document as a raw node.
///
/// Returns whether a script was injected.
///
/// # Errors
///
/// See [`activation_script`].
pub fn inject_activation(doc: &mut Document) -> Result<bool, InvariantError> {
    let Some(script) = activation_script(doc)? else {
        return Ok(false);
    };
    tracing::debug!(docname = %doc.docname, "Injected termynal activation script");
    doc.push(Node::Raw(script));
    Ok(true)
}

//! Directive surface for transcript boxes.
//!
//! Transcript directives use the CommonMark directive syntax at block level:
//!
//! - **Leaf** `::cssterm[cssterm:demo]` loads the transcript from a file
//! - **Container** `:::termynal[termynal:demo]{lineDelay=1000}` ... `:::`
//!   carries the transcript inline
//!
//! [`scan`] splits a document into Markdown and [`Invocation`]s, and each
//! [`TranscriptDirective`] turns one invocation into a tree node.

mod args;
mod context;
mod fence;
mod parser;
mod scanner;

pub use args::DirectiveArgs;
pub use context::DirectiveContext;
pub use scanner::{Block, Invocation, scan};

use crate::error::{Result, SchemaError};
use crate::transcript::{TranscriptFormat, TranscriptId};
use crate::tree::Node;

/// Handler for one transcript format.
///
/// Evaluation is synchronous and happens once per occurrence, in document
/// order.
pub trait TranscriptDirective {
    /// Format handled by this directive.
    fn format(&self) -> TranscriptFormat;

    /// Directive name matched against `::name[...]`.
    fn name(&self) -> &'static str {
        self.format().name()
    }

    /// Evaluate one occurrence into its container node.
    ///
    /// # Errors
    ///
    /// Any schema, configuration, resource or format error aborts the
    /// document.
    fn run(&self, invocation: &Invocation, ctx: &mut DirectiveContext<'_>) -> Result<Node>;
}

/// Extract and validate the single identifier argument.
pub(crate) fn transcript_id(
    format: TranscriptFormat,
    args: &DirectiveArgs,
) -> Result<TranscriptId, SchemaError> {
    match args.arguments().as_slice() {
        [raw] => TranscriptId::parse(format, raw),
        other => Err(SchemaError::ArgumentCount {
            directive: format,
            found: other.len(),
        }),
    }
}

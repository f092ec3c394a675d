//! Terminal transcript boxes for Markdown documentation.
//!
//! Two directives turn recorded terminal sessions into HTML widgets:
//!
//! - `cssterm` renders a plain-text transcript in a static, CSS-styled box
//! - `termynal` renders a YAML list of lines as an animated terminal
//!
//! Transcripts are written inline (container form) or loaded from a
//! configured directory (leaf form):
//!
//! ```text
//! ::cssterm[cssterm:build]
//!
//! :::termynal[termynal:install]{startDelay=600}
//! - value: pip install termdoc
//!   type: input
//! - Successfully installed termdoc
//! :::
//! ```
//!
//! # Architecture
//!
//! Each directive runs parse → resolve → validate → build:
//!
//! - [`directive`]: scanning and argument parsing
//! - [`source`]: inline vs. file-backed content, dependency edges
//! - [`termynal`]: option/line schema, YAML validation, activation script
//! - [`tree`]: the document tree the directives produce
//!
//! [`TermPipeline`] wires the hooks together, [`LabelTable`] and
//! [`AssetRegistry`] hold per-build state, and [`html`] writes the output.

mod assets;
mod cssterm;
pub mod directive;
mod error;
pub mod html;
mod labels;
mod pipeline;
mod source;
pub mod termynal;
mod transcript;
pub mod tree;
mod util;

pub use assets::{AssetRegistry, FormatAssets, STATIC_FILES};
pub use cssterm::CsstermDirective;
pub use error::{ConfigError, Error, FormatError, InvariantError, ResourceError, Result, SchemaError};
pub use labels::{Label, LabelTable, REFERENCE_TITLE};
pub use pipeline::{BuildContext, Page, TermConfig, TermPipeline};
pub use source::{DependencyGraph, TranscriptSource, load_content, resolve_source};
pub use termynal::TermynalDirective;
pub use transcript::{TranscriptFormat, TranscriptId, make_id};
pub use tree::{Document, Node};
pub use util::{escape_html, relative_path};

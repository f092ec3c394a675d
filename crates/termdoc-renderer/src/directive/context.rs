//! Directive evaluation context.

use crate::pipeline::TermConfig;
use crate::source::DependencyGraph;

/// Context handed to a directive while it is evaluated.
///
/// Carries the source location, the build-wide settings and the dependency
/// graph that file-backed transcripts are recorded into.
///
/// # Example
///
/// ```
/// use termdoc_renderer::directive::DirectiveContext;
/// use termdoc_renderer::{DependencyGraph, TermConfig};
///
/// let config = TermConfig::new("/srv/docs").with_termynal_dir("/transcripts");
/// let mut deps = DependencyGraph::new();
/// let ctx = DirectiveContext::new("guide/install", 12, &config, &mut deps);
///
/// assert_eq!(ctx.location(), "guide/install:12");
/// ```
pub struct DirectiveContext<'a> {
    /// Name of the document being parsed (path without extension).
    pub docname: &'a str,
    /// Line number where the directive appears (1-indexed).
    pub line: usize,
    /// Build-wide transcript settings.
    pub config: &'a TermConfig,
    /// Document → transcript file edges.
    pub dependencies: &'a mut DependencyGraph,
}

impl<'a> DirectiveContext<'a> {
    /// Create a context for one directive occurrence.
    pub fn new(
        docname: &'a str,
        line: usize,
        config: &'a TermConfig,
        dependencies: &'a mut DependencyGraph,
    ) -> Self {
        Self {
            docname,
            line,
            config,
            dependencies,
        }
    }

    /// `docname:line`, used in log fields.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}:{}", self.docname, self.line)
    }
}

//! Build pipeline.
//!
//! [`TermPipeline`] exposes the hook points a documentation host calls, in
//! this order:
//!
//! 1. [`on_build_init`](TermPipeline::on_build_init) once per build
//! 2. [`parse_document`](TermPipeline::parse_document) per source document
//! 3. [`on_document_parsed`](TermPipeline::on_document_parsed) once the
//!    document tree is complete
//! 4. [`on_document_resolved`](TermPipeline::on_document_resolved) before
//!    the tree is written out
//! 5. [`on_page_rendered`](TermPipeline::on_page_rendered) per output page
//!
//! Hooks run sequentially; all shared state lives in [`BuildContext`].
//!
//! # Example
//!
//! ```
//! use termdoc_renderer::{Page, TermConfig, TermPipeline};
//!
//! let mut pipeline = TermPipeline::new(TermConfig::new("/srv/docs"));
//! pipeline.on_build_init();
//!
//! let source = ":::termynal[termynal:demo]\n- value: ls\n  type: input\n:::\n";
//! let mut doc = pipeline.parse_document("index", source).unwrap();
//! pipeline.on_document_parsed(&doc).unwrap();
//! pipeline.on_document_resolved(&mut doc).unwrap();
//!
//! let mut page = Page::new("index", Some(doc));
//! pipeline.on_page_rendered(&mut page);
//! assert!(pipeline.context().assets.is_css_registered("termynal.css"));
//! assert_eq!(page.css_files[0], "termynal.css");
//! ```

use std::path::{Path, PathBuf};

use crate::assets::AssetRegistry;
use crate::cssterm::CsstermDirective;
use crate::directive::{Block, DirectiveContext, TranscriptDirective, scan};
use crate::error::Result;
use crate::labels::LabelTable;
use crate::source::DependencyGraph;
use crate::termynal::{TermynalDirective, inject_activation, validate_containment};
use crate::transcript::TranscriptFormat;
use crate::tree::{Document, Node};

/// Build-wide transcript settings.
#[derive(Debug, Clone)]
pub struct TermConfig {
    build_root: PathBuf,
    cssterm_dir: Option<String>,
    termynal_dir: Option<String>,
    static_dir: Option<PathBuf>,
}

impl TermConfig {
    /// Settings for a build rooted at `build_root`, with no transcript
    /// directories and no static root.
    pub fn new(build_root: impl Into<PathBuf>) -> Self {
        Self {
            build_root: build_root.into(),
            cssterm_dir: None,
            termynal_dir: None,
            static_dir: None,
        }
    }

    /// Directory of `cssterm` transcript files.
    #[must_use]
    pub fn with_cssterm_dir(mut self, dir: impl Into<String>) -> Self {
        self.cssterm_dir = Some(dir.into());
        self
    }

    /// Directory of `termynal` transcript files.
    #[must_use]
    pub fn with_termynal_dir(mut self, dir: impl Into<String>) -> Self {
        self.termynal_dir = Some(dir.into());
        self
    }

    /// Directory holding the CSS/JS shipped with the boxes.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    /// Configured transcript directory of a format, as written.
    #[must_use]
    pub fn transcript_dir(&self, format: TranscriptFormat) -> Option<&str> {
        match format {
            TranscriptFormat::Cssterm => self.cssterm_dir.as_deref(),
            TranscriptFormat::Termynal => self.termynal_dir.as_deref(),
        }
    }

    #[must_use]
    pub fn static_dir(&self) -> Option<&Path> {
        self.static_dir.as_deref()
    }
}

/// Registries shared by every hook of one build.
#[derive(Debug, Default)]
pub struct BuildContext {
    /// Cross-reference labels.
    pub labels: LabelTable,
    /// Static search path and registered CSS/JS.
    pub assets: AssetRegistry,
    /// Document → transcript file edges.
    pub dependencies: DependencyGraph,
    /// Documents that received an activation script.
    pub activated: Vec<String>,
}

/// An output page handed to [`TermPipeline::on_page_rendered`].
#[derive(Debug, Clone)]
pub struct Page {
    /// Page name (the docname it was built from).
    pub name: String,
    /// Resolved document tree; `None` for generated pages.
    pub document: Option<Document>,
    /// Scripts the page template already loads.
    pub script_files: Vec<String>,
    /// Stylesheets this page links for its boxes.
    pub css_files: Vec<String>,
    /// Scripts this page links for its boxes.
    pub js_files: Vec<String>,
}

impl Page {
    pub fn new(name: impl Into<String>, document: Option<Document>) -> Self {
        Self {
            name: name.into(),
            document,
            script_files: Vec::new(),
            css_files: Vec::new(),
            js_files: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_script_files(mut self, script_files: Vec<String>) -> Self {
        self.script_files = script_files;
        self
    }
}

/// Transcript directives wired into a build.
pub struct TermPipeline {
    config: TermConfig,
    ctx: BuildContext,
    directives: Vec<Box<dyn TranscriptDirective>>,
}

impl TermPipeline {
    /// Pipeline with both transcript directives registered.
    #[must_use]
    pub fn new(config: TermConfig) -> Self {
        Self {
            config,
            ctx: BuildContext::default(),
            directives: vec![Box::new(CsstermDirective), Box::new(TermynalDirective)],
        }
    }

    #[must_use]
    pub fn config(&self) -> &TermConfig {
        &self.config
    }

    #[must_use]
    pub fn context(&self) -> &BuildContext {
        &self.ctx
    }

    /// Add the static root to the static search path.
    ///
    /// Returns whether the search path changed.
    pub fn on_build_init(&mut self) -> bool {
        let Some(static_dir) = self.config.static_dir.as_deref() else {
            return false;
        };
        self.ctx.assets.add_static_path(static_dir)
    }

    /// Parse one source document into a tree.
    ///
    /// Directives are evaluated in document order. Labels and dependencies
    /// recorded by a previous build of the same document are dropped first,
    /// and anonymous labels are seeded for every named node once the tree is
    /// complete.
    ///
    /// # Errors
    ///
    /// The first directive error aborts the document.
    pub fn parse_document(&mut self, docname: &str, source: &str) -> Result<Document> {
        self.ctx.dependencies.clear_document(docname);
        self.ctx.labels.clear_document(docname);

        let known: Vec<&str> = self.directives.iter().map(|d| d.name()).collect();
        let mut doc = Document::new(docname);

        for block in scan(source, &known)? {
            match block {
                Block::Markdown(text) => doc.push(Node::Markdown(text)),
                Block::Directive(invocation) => {
                    let Some(directive) = self
                        .directives
                        .iter()
                        .find(|d| d.name() == invocation.name)
                    else {
                        continue;
                    };
                    let mut ctx = DirectiveContext::new(
                        docname,
                        invocation.line,
                        &self.config,
                        &mut self.ctx.dependencies,
                    );
                    doc.push(directive.run(&invocation, &mut ctx)?);
                }
            }
        }

        self.ctx.labels.link_targets(&doc);
        Ok(doc)
    }

    /// Register the "terminal box" label of every box in the document.
    ///
    /// Returns the number of labels written.
    ///
    /// # Errors
    ///
    /// Returns an internal error when a box was not built or linked properly.
    pub fn on_document_parsed(&mut self, doc: &Document) -> Result<usize> {
        Ok(self.ctx.labels.register_boxes(doc)?)
    }

    /// Validate line containment, then append the activation script.
    ///
    /// Returns whether a script was injected.
    ///
    /// # Errors
    ///
    /// Returns an internal error for a line outside a termynal box or a box
    /// without exactly one termynal id.
    pub fn on_document_resolved(&mut self, doc: &mut Document) -> Result<bool> {
        validate_containment(doc)?;
        let injected = inject_activation(doc)?;
        if injected {
            self.ctx.activated.push(doc.docname.clone());
        }
        Ok(injected)
    }

    /// Register the assets a page needs and attach them to the page.
    ///
    /// Only formats with a box on this page contribute links; the build-wide
    /// registry records each file once. Pages without a document or without
    /// boxes are skipped. Returns the number of new registrations.
    pub fn on_page_rendered(&mut self, page: &mut Page) -> usize {
        let Some(doc) = &page.document else {
            return 0;
        };
        let formats: Vec<TranscriptFormat> = [TranscriptFormat::Cssterm, TranscriptFormat::Termynal]
            .into_iter()
            .filter(|format| doc.has_boxes(*format))
            .collect();

        let mut added = 0;
        for format in formats {
            added += self.ctx.assets.register_format(format, &page.script_files);
            let assets = format.assets();
            for file in assets.stylesheets() {
                push_unique(&mut page.css_files, file);
            }
            for file in assets.scripts(&page.script_files) {
                push_unique(&mut page.js_files, file);
            }
        }
        if added > 0 {
            tracing::debug!(page = %page.name, added, "Registered transcript assets");
        }
        added
    }
}

fn push_unique(files: &mut Vec<String>, file: &str) {
    if !files.iter().any(|f| f == file) {
        files.push(file.to_owned());
    }
}

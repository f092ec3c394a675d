//! `termdoc build` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use termdoc_config::{CliSettings, Config};
use termdoc_renderer::{Page, STATIC_FILES, TermConfig, TermPipeline, html};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover termdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// HTML output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose output (per-build summaries and warnings).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Counts reported once a build finishes.
#[derive(Debug, Default, PartialEq, Eq)]
struct BuildSummary {
    pages: usize,
    activated: usize,
    static_files: usize,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, a document fails to build,
    /// or an output file cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.status(
            "Building",
            &config.docs_resolved.source_dir.display().to_string(),
        );

        let summary = run_build(&config)?;
        if summary.pages == 0 {
            output.warning("no Markdown documents found");
            return Ok(());
        }
        if summary.static_files == 0 {
            output.warning("no box assets found under the static directory");
        }

        output.status(
            "Finished",
            &format!(
                "{} page(s), {} with animated boxes, in {}",
                summary.pages,
                summary.activated,
                config.docs_resolved.output_dir.display()
            ),
        );
        Ok(())
    }
}

/// Translate the loaded configuration into renderer settings.
fn term_config(config: &Config) -> TermConfig {
    let mut term_config =
        TermConfig::new(&config.docs_resolved.source_dir).with_static_dir(&config.static_dir);
    if let Some(dir) = &config.cssterm.dir {
        term_config = term_config.with_cssterm_dir(dir.as_str());
    }
    if let Some(dir) = &config.termynal.dir {
        term_config = term_config.with_termynal_dir(dir.as_str());
    }
    term_config
}

/// Run every pipeline hook over the source tree and write the site.
fn run_build(config: &Config) -> Result<BuildSummary, CliError> {
    let source_dir = &config.docs_resolved.source_dir;
    let output_dir = &config.docs_resolved.output_dir;
    if !source_dir.is_dir() {
        return Err(CliError::Validation(format!(
            "Source directory not found: {}",
            source_dir.display()
        )));
    }

    let mut pipeline = TermPipeline::new(term_config(config));
    pipeline.on_build_init();

    let mut documents = Vec::new();
    for (docname, path) in discover_documents(source_dir)? {
        let source = fs::read_to_string(&path)?;
        let doc = pipeline
            .parse_document(&docname, &source)
            .map_err(|source| render_error(&docname, source))?;
        pipeline
            .on_document_parsed(&doc)
            .map_err(|source| render_error(&docname, source))?;
        documents.push(doc);
    }

    for doc in &mut documents {
        pipeline
            .on_document_resolved(doc)
            .map_err(|source| render_error(&doc.docname, source))?;
    }

    let mut pages = 0;
    for doc in documents {
        let mut page = Page::new(doc.docname.clone(), Some(doc));
        pipeline.on_page_rendered(&mut page);
        write_page(output_dir, &page, &html::render_page(&page))?;
        pages += 1;
    }

    let static_files = copy_static_files(pipeline.context().assets.static_paths(), output_dir)?;

    let summary = BuildSummary {
        pages,
        activated: pipeline.context().activated.len(),
        static_files,
    };
    tracing::info!(
        pages = summary.pages,
        activated = summary.activated,
        static_files = summary.static_files,
        output = %output_dir.display(),
        "Build finished"
    );
    Ok(summary)
}

fn render_error(docname: &str, source: termdoc_renderer::Error) -> CliError {
    CliError::Render {
        docname: docname.to_owned(),
        source,
    }
}

/// Markdown documents under `source_dir` as `(docname, path)`, sorted by path.
///
/// The docname is the `/`-separated path relative to `source_dir` without
/// the `.md` extension.
fn discover_documents(source_dir: &Path) -> Result<Vec<(String, PathBuf)>, CliError> {
    let pattern = source_dir.join("**").join("*.md");
    let mut paths = glob::glob(&pattern.to_string_lossy())?.collect::<Result<Vec<_>, _>>()?;
    paths.sort();

    Ok(paths
        .into_iter()
        .filter_map(|path| {
            let relative = path.strip_prefix(source_dir).ok()?.with_extension("");
            let docname = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            Some((docname, path))
        })
        .collect())
}

fn write_page(output_dir: &Path, page: &Page, html: &str) -> Result<(), CliError> {
    let path = output_dir.join(format!("{}.html", page.name));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, html)?;
    tracing::debug!(page = %page.name, path = %path.display(), "Wrote page");
    Ok(())
}

/// Copy the shipped box assets found under the static search path into
/// `<output_dir>/_static/`. Earlier paths win.
fn copy_static_files(static_paths: &[PathBuf], output_dir: &Path) -> Result<usize, CliError> {
    let target = output_dir.join("_static");
    let mut copied = 0;
    for file in STATIC_FILES {
        let Some(source) = static_paths
            .iter()
            .map(|dir| dir.join(file))
            .find(|path| path.is_file())
        else {
            continue;
        };
        fs::create_dir_all(&target)?;
        fs::copy(&source, target.join(file))?;
        copied += 1;
    }
    Ok(copied)
}

//! Transcript content resolution.
//!
//! Decides between an inline directive body and a file inside the configured
//! transcript directory, and records file dependencies so that documents can
//! be rebuilt when a transcript changes.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::directive::DirectiveContext;
use crate::error::{ConfigError, ResourceError, Result};
use crate::transcript::{TranscriptFormat, TranscriptId};

/// Where the content of one directive comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptSource<'a> {
    /// Body written inside the directive.
    Inline(&'a [String]),
    /// File inside the configured transcript directory.
    FileBacked {
        /// Localised transcript directory.
        directory: PathBuf,
        /// Derived file name (`<stem>.log` or `<stem>.yml`).
        file_name: String,
    },
}

/// Pick the source for a directive.
///
/// A non-blank inline body wins regardless of configuration. Otherwise the
/// directory setting for the format must be present and point to an
/// existing directory.
pub fn resolve_source<'a>(
    id: &TranscriptId,
    body: Option<&'a [String]>,
    ctx: &DirectiveContext<'_>,
) -> Result<TranscriptSource<'a>> {
    if let Some(lines) = body.filter(|lines| lines.iter().any(|l| !l.trim().is_empty())) {
        return Ok(TranscriptSource::Inline(lines));
    }

    let format = id.format();
    let directory = localise_directory(
        ctx.config.build_root(),
        ctx.config.transcript_dir(format),
        format,
    )?;

    Ok(TranscriptSource::FileBacked {
        directory,
        file_name: id.file_name(),
    })
}

/// Read the content of a resolved source.
///
/// File-backed content is read whole and its dependency on the current
/// document is recorded. Trailing newlines are stripped in both cases.
pub fn load_content(source: &TranscriptSource<'_>, ctx: &mut DirectiveContext<'_>) -> Result<String> {
    let content = match source {
        TranscriptSource::Inline(lines) => lines.join("\n"),
        TranscriptSource::FileBacked {
            directory,
            file_name,
        } => {
            let path = directory.join(file_name);
            ensure_file(&path)?;
            ctx.dependencies.note(ctx.docname, &path);

            let content = std::fs::read_to_string(&path).map_err(|source| ResourceError::Read {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), docname = ctx.docname, "Loaded transcript file");
            content
        }
    };

    Ok(content.trim_end_matches('\n').to_owned())
}

/// Place the configured directory inside the build root.
///
/// A leading `/` is read as "relative to the build root", not as the
/// filesystem root.
fn localise_directory(
    build_root: &Path,
    configured: Option<&str>,
    format: TranscriptFormat,
) -> Result<PathBuf> {
    let configured = configured.ok_or(ConfigError {
        setting: format.dir_setting(),
        content: format.content_label(),
    })?;

    let directory = build_root.join(configured.trim_start_matches('/'));
    if !directory.exists() {
        return Err(ResourceError::MissingDirectory {
            setting: format.dir_setting(),
            path: directory,
        }
        .into());
    }
    Ok(directory)
}

fn ensure_file(path: &Path) -> Result<(), ResourceError> {
    if !path.exists() {
        return Err(ResourceError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(ResourceError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Document → transcript file edges collected during a build.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    edges: BTreeMap<String, BTreeSet<PathBuf>>,
}

impl DependencyGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `docname` was built from `path`.
    pub fn note(&mut self, docname: &str, path: &Path) {
        self.edges
            .entry(docname.to_owned())
            .or_default()
            .insert(path.to_path_buf());
    }

    /// Transcript files a document depends on.
    pub fn dependencies_of(&self, docname: &str) -> impl Iterator<Item = &Path> {
        self.edges
            .get(docname)
            .into_iter()
            .flatten()
            .map(PathBuf::as_path)
    }

    /// Documents that must be rebuilt when `path` changes.
    #[must_use]
    pub fn dependents_of(&self, path: &Path) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|(_, paths)| paths.contains(path))
            .map(|(docname, _)| docname.as_str())
            .collect()
    }

    /// Forget the edges of a document before it is rebuilt.
    pub fn clear_document(&mut self, docname: &str) {
        self.edges.remove(docname);
    }
}

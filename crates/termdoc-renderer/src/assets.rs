//! Static asset registration.
//!
//! Keeps the static search path and the CSS/JS files pages must load.
//! Every registration is membership-checked, so repeating a page hook never
//! duplicates an entry.

use std::path::{Path, PathBuf};

use crate::termynal::ACTIVATION_SCRIPT;
use crate::transcript::TranscriptFormat;

/// Files and third-party dependencies of one transcript format.
#[derive(Debug)]
pub struct FormatAssets {
    /// Stylesheets shipped in the static root.
    pub css: &'static [&'static str],
    /// Scripts shipped in the static root and linked from pages.
    pub js: &'static [&'static str],
    /// `(file name, URL)` scripts skipped when the page already loads a
    /// file with that name.
    pub js_dependencies: &'static [(&'static str, &'static str)],
    /// External stylesheets.
    pub css_dependencies: &'static [&'static str],
}

static CSSTERM_ASSETS: FormatAssets = FormatAssets {
    css: &["cssterm.css"],
    js: &["cssterm.js"],
    js_dependencies: &[("jquery.js", "https://code.jquery.com/jquery-latest.min.js")],
    css_dependencies: &[],
};

// termynal.js is loaded by the activation script, never linked directly.
static TERMYNAL_ASSETS: FormatAssets = FormatAssets {
    css: &["termynal.css"],
    js: &[],
    js_dependencies: &[],
    css_dependencies: &["https://fonts.googleapis.com/css?family=Fira+Mono"],
};

impl FormatAssets {
    /// Stylesheets a page holding this format links, shipped files first.
    #[must_use]
    pub fn stylesheets(&self) -> Vec<&'static str> {
        self.css.iter().chain(self.css_dependencies).copied().collect()
    }

    /// Scripts a page holding this format links.
    ///
    /// `script_files` are the scripts the page already loads; a dependency
    /// whose file name matches one of their base names is left out.
    #[must_use]
    pub fn scripts(&self, script_files: &[String]) -> Vec<&'static str> {
        let dependencies = self
            .js_dependencies
            .iter()
            .filter(|(stub, _)| !script_files.iter().any(|s| base_name(s) == *stub))
            .map(|(_, url)| *url);
        self.js.iter().copied().chain(dependencies).collect()
    }
}

impl TranscriptFormat {
    /// Assets pages need when they hold a box of this format.
    #[must_use]
    pub fn assets(self) -> &'static FormatAssets {
        match self {
            Self::Cssterm => &CSSTERM_ASSETS,
            Self::Termynal => &TERMYNAL_ASSETS,
        }
    }
}

/// Every file expected in the static root.
pub const STATIC_FILES: [&str; 4] = ["cssterm.css", "cssterm.js", "termynal.css", ACTIVATION_SCRIPT];

/// Per-build asset registry.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    static_paths: Vec<PathBuf>,
    css_files: Vec<String>,
    js_files: Vec<String>,
}

impl AssetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a directory to the static search path unless already present.
    ///
    /// Returns whether the path was added.
    pub fn add_static_path(&mut self, path: &Path) -> bool {
        if self.static_paths.iter().any(|p| p == path) {
            return false;
        }
        for file in STATIC_FILES {
            if !path.join(file).is_file() {
                tracing::warn!(path = %path.display(), file, "Static file missing");
            }
        }
        self.static_paths.push(path.to_path_buf());
        true
    }

    #[must_use]
    pub fn static_paths(&self) -> &[PathBuf] {
        &self.static_paths
    }

    #[must_use]
    pub fn css_files(&self) -> &[String] {
        &self.css_files
    }

    #[must_use]
    pub fn js_files(&self) -> &[String] {
        &self.js_files
    }

    #[must_use]
    pub fn is_css_registered(&self, file: &str) -> bool {
        self.css_files.iter().any(|f| f == file)
    }

    #[must_use]
    pub fn is_js_registered(&self, file: &str) -> bool {
        self.js_files.iter().any(|f| f == file)
    }

    /// Register a stylesheet once. Returns whether it was added.
    pub fn add_css_file(&mut self, file: &str) -> bool {
        if self.is_css_registered(file) {
            return false;
        }
        self.css_files.push(file.to_owned());
        true
    }

    /// Register a script once. Returns whether it was added.
    pub fn add_js_file(&mut self, file: &str) -> bool {
        if self.is_js_registered(file) {
            return false;
        }
        self.js_files.push(file.to_owned());
        true
    }

    /// Register everything a page holding `format` boxes needs.
    ///
    /// Returns the number of new registrations.
    pub fn register_format(&mut self, format: TranscriptFormat, script_files: &[String]) -> usize {
        let assets = format.assets();
        let mut added = 0;
        for file in assets.stylesheets() {
            added += usize::from(self.add_css_file(file));
        }
        for file in assets.scripts(script_files) {
            added += usize::from(self.add_js_file(file));
        }
        added
    }
}

fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

//! Colored status lines on stderr.

use console::{Style, Term};

/// Width the status labels are right-aligned to.
const LABEL_WIDTH: usize = 12;

/// Status output in the `   Finished message` layout.
pub(crate) struct Output {
    term: Term,
    label: Style,
    warning: Style,
    error: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().green().bold(),
            warning: Style::new().yellow().bold(),
            error: Style::new().red(),
        }
    }

    /// Print a step of the build under a bold green label.
    pub(crate) fn status(&self, label: &str, msg: &str) {
        let label = format!("{label:>LABEL_WIDTH$}");
        let _ = self
            .term
            .write_line(&format!("{} {msg}", self.label.apply_to(label)));
    }

    /// Print a warning under a yellow label.
    pub(crate) fn warning(&self, msg: &str) {
        let label = format!("{:>LABEL_WIDTH$}", "Warning");
        let _ = self
            .term
            .write_line(&format!("{} {msg}", self.warning.apply_to(label)));
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.error.apply_to(msg).to_string());
    }
}

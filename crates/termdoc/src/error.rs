//! CLI error types.

use termdoc_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{docname}: {source}")]
    Render {
        docname: String,
        #[source]
        source: termdoc_renderer::Error,
    },

    #[error("{0}")]
    Validation(String),
}

impl From<glob::PatternError> for CliError {
    fn from(err: glob::PatternError) -> Self {
        Self::Validation(format!("Invalid source pattern: {err}"))
    }
}

impl From<glob::GlobError> for CliError {
    fn from(err: glob::GlobError) -> Self {
        Self::Io(err.into_error())
    }
}

//! Environment variable expansion for directory settings.
//!
//! Only the braced forms are recognised:
//! - `${VAR}` expands to the value of VAR and fails when it is unset
//! - `${VAR:-default}` falls back to `default` when VAR is unset

use crate::ConfigError;

/// Expand `${}` references in a configuration value.
///
/// Values without `${` are returned unchanged, so a bare `$` in a path is
/// never interpreted.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Expand an optional setting in place.
pub(crate) fn expand_optional(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand_env(raw, field)?);
    }
    Ok(())
}

/// Name of the variable that could not be resolved.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TERMDOC_TEST_DIR", "transcripts");
        }
        let result = expand_env("${TERMDOC_TEST_DIR}/cssterm", "cssterm.dir").unwrap();
        assert_eq!(result, "transcripts/cssterm");
        unsafe {
            std::env::remove_var("TERMDOC_TEST_DIR");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TERMDOC_UNSET_DIR");
        }
        let result = expand_env("${TERMDOC_UNSET_DIR:-/logs}", "termynal.dir").unwrap();
        assert_eq!(result, "/logs");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TERMDOC_MISSING_DIR");
        }
        let err = expand_env("${TERMDOC_MISSING_DIR}", "termynal.dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("TERMDOC_MISSING_DIR"));
        assert!(err.to_string().contains("termynal.dir"));
    }

    #[test]
    fn test_bare_dollar_untouched() {
        let result = expand_env("logs/$HOME", "cssterm.dir").unwrap();
        assert_eq!(result, "logs/$HOME");
    }

    #[test]
    fn test_expand_optional_none() {
        let mut value = None;
        expand_optional(&mut value, "cssterm.dir").unwrap();
        assert!(value.is_none());
    }
}

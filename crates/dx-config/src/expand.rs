//! Environment variable expansion for config values.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` / `$VAR` references using the process environment.
///
/// # Errors
///
/// Returns [`ConfigError::Expand`] when a referenced variable is unset.
pub(crate) fn expand_env(value: &str) -> Result<String, ConfigError> {
    expand_with(value, |var| std::env::var(var).ok())
}

/// Expand `${VAR}` / `$VAR` references using a custom lookup.
///
/// Exposed for callers (and tests) that need expansion against something
/// other than the process environment.
///
/// # Errors
///
/// Returns [`ConfigError::Expand`] when the lookup has no value for a
/// referenced variable.
pub fn expand_with<F>(value: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    shellexpand::env_with_context(value, |var: &str| -> Result<Option<Cow<'_, str>>, String> {
        match lookup(var) {
            Some(v) => Ok(Some(Cow::Owned(v))),
            None => Err(format!("variable '{var}' is not set")),
        }
    })
    .map(Cow::into_owned)
    .map_err(|e| ConfigError::Expand(e.to_string()))
}

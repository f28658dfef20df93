//! Configuration management for DX.
//!
//! Parses `dx.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ## Environment Variable Expansion
//!
//! Path values support `${VAR}` / `$VAR` environment expansion:
//!
//! ```toml
//! [build]
//! source_dir = "${DOCS_ROOT}/content"
//! manifest = "${DOCS_ROOT}/manifest.yaml"
//! output_dir = "build"
//!
//! [validation]
//! references = "error"
//!
//! [validation.overrides]
//! "legacy/changelog" = "warn"
//! ```
//!
//! Relative paths are resolved against the directory containing the config
//! file.

mod expand;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use expand::expand_with;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "dx.toml";

/// Error loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read {path}: {message}")]
    Read {
        /// Path attempted.
        path: PathBuf,
        /// I/O message.
        message: String,
    },
    /// Malformed TOML.
    #[error("invalid config: {0}")]
    Parse(String),
    /// Environment expansion failed.
    #[error("environment expansion failed: {0}")]
    Expand(String),
}

/// Severity configured for reference-class validation findings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceSeverity {
    /// Report and keep building.
    Warn,
    /// Fail the document.
    #[default]
    Error,
}

/// Build paths.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Root directory of document and fragment sources.
    pub source_dir: PathBuf,
    /// Path to the navigation manifest.
    pub manifest: PathBuf,
    /// Directory for output artifacts.
    pub output_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs"),
            manifest: PathBuf::from("docs/manifest.yaml"),
            output_dir: PathBuf::from("build"),
        }
    }
}

/// Validation behavior.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Default severity for reference findings.
    pub references: ReferenceSeverity,
    /// Per-document overrides, keyed by document key.
    pub overrides: HashMap<String, ReferenceSeverity>,
}

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build paths.
    pub build: BuildConfig,
    /// Validation behavior.
    pub validation: ValidationConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Path fields are environment-expanded and resolved relative to the
    /// config file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on read, parse, or expansion failure.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut config: Self =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.build.source_dir = resolve(base, &config.build.source_dir)?;
        config.build.manifest = resolve(base, &config.build.manifest)?;
        config.build.output_dir = resolve(base, &config.build.output_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Search for `dx.toml` in `start_dir` and its ancestors.
    #[must_use]
    pub fn discover(start_dir: &Path) -> Option<PathBuf> {
        let mut dir = Some(start_dir);
        while let Some(current) = dir {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            dir = current.parent();
        }
        None
    }

    /// Load the discovered config, or defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a discovered file fails to load.
    pub fn load_or_default(start_dir: &Path) -> Result<Self, ConfigError> {
        match Self::discover(start_dir) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// The reference severity configured for one document.
    #[must_use]
    pub fn reference_severity_for(&self, doc_key: &str) -> ReferenceSeverity {
        self.validation
            .overrides
            .get(doc_key)
            .copied()
            .unwrap_or(self.validation.references)
    }
}

/// Expand env vars in a path and resolve it against `base` if relative.
fn resolve(base: &Path, path: &Path) -> Result<PathBuf, ConfigError> {
    let text = path.to_string_lossy();
    let expanded = expand::expand_env(&text)?;
    let expanded = PathBuf::from(expanded);
    Ok(if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    })
}

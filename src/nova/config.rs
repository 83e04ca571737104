//! Configuration loading
//!
//! `defaults/nova.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Callers layer user files and CLI overrides
//! on top via [`Loader`] before deserializing into [`NovaConfig`].

use crate::nova::rules::{RuleError, RuleSet};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../../defaults/nova.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NovaConfig {
    pub rules: RulesConfig,
    pub generation: GenerationConfig,
    pub build: BuildConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    pub path: String,
}

impl RulesConfig {
    /// The configured rule file, if any
    pub fn path(&self) -> Option<PathBuf> {
        let path = self.path.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub default_class: String,
    pub indent: String,
}

/// Settings for the javac/java runner
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    pub work_dir: PathBuf,
    pub compiler: String,
    pub runtime: String,
}

impl NovaConfig {
    /// Load the configured rule file, or the embedded rules when none is set
    pub fn load_rules(&self) -> Result<Arc<RuleSet>, RuleError> {
        match self.rules.path() {
            Some(path) => RuleSet::load(path).map(Arc::new),
            None => Ok(RuleSet::builtin()),
        }
    }
}

/// Project file picked up from the working directory when present
pub const PROJECT_FILE: &str = "nova.toml";

/// Builds a [`NovaConfig`] from the embedded defaults plus TOML layers.
///
/// Later layers win; overrides win over every file.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        tracing::debug!(path = %path.display(), required, "config layer");
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }

    /// Layer a TOML file that must exist
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a TOML file, skipped when absent (e.g. [`PROJECT_FILE`])
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Set one dotted key, e.g. `rules.path` from `--rules`
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<NovaConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults with nothing layered on top
pub fn load_defaults() -> Result<NovaConfig, ConfigError> {
    Loader::new().build()
}

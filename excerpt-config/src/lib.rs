//! Shared configuration loader for the excerpt toolchain.
//!
//! `defaults/excerpt.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`ExcerptConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/excerpt.default.toml");

/// Top-level configuration consumed by excerpt applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ExcerptConfig {
    pub output: OutputConfig,
    pub folder: FolderConfig,
}

/// Where rendered citation notes are written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path slice pattern expanded over the source document's path
    /// segments, e.g. `Extract/{2:}`.
    pub path_pattern: String,
}

/// Folder extraction behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct FolderConfig {
    /// Extensions of the files picked up when processing a folder.
    pub extensions: Vec<String>,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ExcerptConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ExcerptConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.output.path_pattern, "Extract/{2:}");
        assert_eq!(config.folder.extensions, vec!["md".to_string()]);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.path_pattern", "Refs/{3:}")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.path_pattern, "Refs/{3:}");
    }

    #[test]
    fn overrides_leave_other_keys_at_defaults() {
        let config = Loader::new()
            .set_override("output.path_pattern", "{1}")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.folder.extensions, vec!["md".to_string()]);
    }
}

//! Generator configuration (`pojobuilder.toml`).
//!
//! ```toml
//! [output]
//! dir = "src/builders"
//! layout = "modules"
//!
//! [[target]]
//! name = "Address"
//! source = "src/model.rs"
//! module = "crate::model"
//! copy_method = true
//! ```
//!
//! Relative paths are resolved against the directory holding the
//! configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::errors::GeneratorError;
use crate::naming::is_valid_identifier;

/// How generated units are laid out on disk.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Layout {
    /// `mod.rs`, `shared.rs` and one file per builder.
    #[default]
    Modules,
    /// A single `builders.rs` with inline modules, for `include!`.
    Bundle,
}

/// The `[output]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory generated files are written to.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Output layout.
    #[serde(default)]
    pub layout: Layout,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("src/builders")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            layout: Layout::default(),
        }
    }
}

/// One `[[target]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Struct name.
    pub name: String,
    /// Source file declaring the struct.
    pub source: PathBuf,
    /// Module path of the source file within its crate.
    pub module: String,
    /// Generate a `copy()` method.
    #[serde(default)]
    pub copy_method: bool,
    /// Designated constructor.
    #[serde(default)]
    pub constructor: Option<String>,
    /// Overrides the builder type name.
    #[serde(default)]
    pub builder_name: Option<String>,
}

/// The whole configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// Targets in generation order.
    #[serde(rename = "target", default)]
    pub targets: Vec<TargetConfig>,
}

impl GeneratorConfig {
    /// Loads and validates a configuration file, resolving relative paths
    /// against its directory.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::ReadError`] if the file cannot be read and
    /// [`GeneratorError::ConfigError`] if it is malformed or invalid.
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let content = fs::read_to_string(path).map_err(|e| GeneratorError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parses and validates configuration text. Paths are left as written.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::ConfigError`] for malformed TOML, unknown
    /// keys, or invalid values.
    pub fn from_toml_str(content: &str) -> Result<Self, GeneratorError> {
        let config: Self =
            toml::from_str(content).map_err(|e| GeneratorError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Makes relative source and output paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.output.dir.is_relative() {
            self.output.dir = base.join(&self.output.dir);
        }
        for target in &mut self.targets {
            if target.source.is_relative() {
                target.source = base.join(&target.source);
            }
        }
    }

    /// Source files of every target, without duplicates, in order.
    pub fn source_files(&self) -> Vec<&Path> {
        let mut files: Vec<&Path> = Vec::new();
        for target in &self.targets {
            if !files.contains(&target.source.as_path()) {
                files.push(&target.source);
            }
        }
        files
    }

    fn validate(&self) -> Result<(), GeneratorError> {
        if self.targets.is_empty() {
            return Err(GeneratorError::ConfigError(
                "at least one [[target]] is required".to_string(),
            ));
        }

        for target in &self.targets {
            if !is_valid_identifier(&target.name) {
                return Err(GeneratorError::ConfigError(format!(
                    "target name '{}' is not a valid identifier",
                    target.name
                )));
            }
            if let Some(builder) = &target.builder_name
                && !is_valid_identifier(builder)
            {
                return Err(GeneratorError::ConfigError(format!(
                    "{}: builder_name '{}' is not a valid identifier",
                    target.name, builder
                )));
            }
            if syn::parse_str::<syn::Path>(&target.module).is_err() {
                return Err(GeneratorError::ConfigError(format!(
                    "{}: module '{}' is not a module path",
                    target.name, target.module
                )));
            }
        }
        Ok(())
    }
}

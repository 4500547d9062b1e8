//! Build script integration.
//!
//! Lets a crate generate its builders at compile time:
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     if let Err(e) = pojobuilder_gen::build_script::generate_into_out_dir("pojobuilder.toml") {
//!         panic!("{e}");
//!     }
//! }
//!
//! // src/lib.rs
//! pub mod builders {
//!     include!(concat!(env!("OUT_DIR"), "/builders.rs"));
//! }
//! ```

use std::env;
use std::path::{Path, PathBuf};

use crate::config::{GeneratorConfig, Layout};
use crate::errors::GeneratorError;
use crate::generate::{GenerationReport, generate_from_config};

/// Generates the configured builders into `OUT_DIR` as a single bundle.
///
/// The output directory and layout of the configuration are overridden.
/// Cargo is told to rerun the script when the configuration or any scanned
/// source changes.
///
/// ## Errors
///
/// Returns [`GeneratorError::ConfigError`] when `OUT_DIR` is not set, the
/// error of the failing stage when generation fails, and
/// [`GeneratorError::Rejected`] when any target was rejected.
pub fn generate_into_out_dir(config_path: impl AsRef<Path>) -> Result<PathBuf, GeneratorError> {
    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| GeneratorError::ConfigError("OUT_DIR is not set".to_string()))?;
    generate_into(config_path.as_ref(), &out_dir)
}

/// Same as [`generate_into_out_dir`] with an explicit output directory.
///
/// ## Errors
///
/// See [`generate_into_out_dir`].
pub fn generate_into(config_path: &Path, out_dir: &Path) -> Result<PathBuf, GeneratorError> {
    println!("cargo:rerun-if-changed={}", config_path.display());

    let mut config = GeneratorConfig::load(config_path)?;
    for source in config.source_files() {
        println!("cargo:rerun-if-changed={}", source.display());
    }
    config.output.dir = out_dir.to_path_buf();
    config.output.layout = Layout::Bundle;

    let report = generate_from_config(&config, false)?;
    reject_diagnostics(report)?;

    Ok(out_dir.join(crate::output::BUNDLE_FILE))
}

fn reject_diagnostics(report: GenerationReport) -> Result<(), GeneratorError> {
    if report.is_clean() {
        Ok(())
    } else {
        Err(GeneratorError::Rejected(report.diagnostics))
    }
}

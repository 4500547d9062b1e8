//! Generation pipeline.
//!
//! Ties the stages together: descriptors are turned into [`BuilderModel`]s
//! (in parallel, one target per task), builder names are checked across the
//! whole set, and the surviving models are rendered and written by
//! [`crate::output`].
//!
//! Model errors never abort a run. They are collected into the
//! [`GenerationReport`] and only the offending target is skipped.

use std::path::{Path, PathBuf};

use pojobuilder_define::TargetType;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{GeneratorConfig, Layout};
use crate::errors::{GeneratorError, ModelError};
use crate::extract::extract_properties;
use crate::model::BuilderModel;
use crate::output::{render_units, write_units};
use crate::resolve::resolve_strategy;
use crate::scan::SourceScanner;
use crate::validation::{check_builder_names, check_unique_fields, validate_model};

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Models that passed every check, in configuration order.
    pub models: Vec<BuilderModel>,
    /// One entry per rejected target, in configuration order.
    pub diagnostics: Vec<ModelError>,
    /// Files written (empty on a dry run).
    pub files: Vec<PathBuf>,
}

impl GenerationReport {
    /// Returns `true` when no target was rejected.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Names of the generated builders.
    pub fn builder_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.builder_name.as_str()).collect()
    }
}

/// Derives the builder model of one target type.
///
/// ## Errors
///
/// Returns the first [`ModelError`] found for the target.
pub fn derive_model(target: &TargetType) -> Result<BuilderModel, ModelError> {
    check_unique_fields(target)?;
    let extracted = extract_properties(target)?;
    let resolution = resolve_strategy(target, extracted)?;

    let target_type = target.qualified_name();
    let model = BuilderModel {
        copy_source: target.options.copy_method.then(|| target_type.clone()),
        target_type,
        target_name: target.name.clone(),
        builder_name: target.builder_name(),
        properties: resolution.properties,
        strategy: resolution.strategy,
    };

    validate_model(&model)?;
    Ok(model)
}

/// Derives the models of every target and checks them against each other.
///
/// Derivation runs in parallel; the result keeps the input order.
pub fn derive_models(targets: &[TargetType]) -> GenerationReport {
    let derived: Vec<Result<BuilderModel, ModelError>> =
        targets.par_iter().map(derive_model).collect();

    let mut candidates = Vec::new();
    let mut diagnostics: Vec<(usize, ModelError)> = Vec::new();
    for (index, result) in derived.into_iter().enumerate() {
        match result {
            Ok(model) => candidates.push((index, model)),
            Err(err) => diagnostics.push((index, err)),
        }
    }

    let models: Vec<BuilderModel> = candidates.iter().map(|(_, m)| m.clone()).collect();
    let collisions = check_builder_names(&models);
    let rejected: Vec<usize> = collisions.iter().map(|(i, _)| *i).collect();
    for (candidate, err) in collisions {
        diagnostics.push((candidates[candidate].0, err));
    }
    diagnostics.sort_by_key(|(index, _)| *index);

    let models = candidates
        .into_iter()
        .enumerate()
        .filter(|(candidate, _)| !rejected.contains(candidate))
        .map(|(_, (_, model))| model)
        .collect();

    let report = GenerationReport {
        models,
        diagnostics: diagnostics.into_iter().map(|(_, err)| err).collect(),
        files: Vec::new(),
    };
    for diagnostic in &report.diagnostics {
        warn!(target_type = %diagnostic.target(), "{diagnostic}");
    }
    debug!(
        models = report.models.len(),
        diagnostics = report.diagnostics.len(),
        "derived builder models"
    );
    report
}

/// Generates builders for already-described targets.
///
/// ## Errors
///
/// Returns [`GeneratorError`] when the generated code is invalid or cannot
/// be written. Rejected targets are reported, not returned as errors.
pub fn generate_targets(
    targets: &[TargetType],
    output_dir: &Path,
    layout: Layout,
    dry_run: bool,
) -> Result<GenerationReport, GeneratorError> {
    let mut report = derive_models(targets);
    let units = render_units(&report.models, layout)?;

    if dry_run {
        for unit in &units {
            println!("=== {} ===\n{}\n", unit.file_name, unit.content);
        }
    } else {
        report.files = write_units(&units, output_dir)?;
        info!(
            files = report.files.len(),
            output_dir = %output_dir.display(),
            "wrote generated builders"
        );
    }

    Ok(report)
}

/// Scans the configured sources and generates their builders.
///
/// ## Errors
///
/// Returns [`GeneratorError`] when a source cannot be read or scanned, or
/// when writing fails.
pub fn generate_from_config(
    config: &GeneratorConfig,
    dry_run: bool,
) -> Result<GenerationReport, GeneratorError> {
    let targets = scan_targets(config)?;
    generate_targets(&targets, &config.output.dir, config.output.layout, dry_run)
}

/// Scans every configured target, parsing each source file once.
///
/// ## Errors
///
/// Returns [`GeneratorError`] for unreadable sources and unsupported or
/// missing structs.
pub fn scan_targets(config: &GeneratorConfig) -> Result<Vec<TargetType>, GeneratorError> {
    let mut scanner = SourceScanner::new();
    config
        .targets
        .iter()
        .map(|target| {
            debug!(target_type = %target.name, source = %target.source.display(), "scanning");
            scanner.scan(target)
        })
        .collect()
}

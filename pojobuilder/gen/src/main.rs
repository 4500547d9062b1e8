//! Pojobuilder Code Generator
//!
//! Generates fluent builders for the structs listed in `pojobuilder.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use pojobuilder_define::TargetType;
use pojobuilder_gen::config::{GeneratorConfig, Layout};
use pojobuilder_gen::errors::GeneratorError;
use pojobuilder_gen::generate::{GenerationReport, generate_from_config, generate_targets};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Pojobuilder code generator - turns struct definitions into fluent builders
#[derive(Parser, Debug)]
#[command(name = "pojobuilder-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "pojobuilder.toml")]
    config: PathBuf,

    /// JSON file with an array of target descriptors, used instead of
    /// scanning sources
    #[arg(long)]
    descriptors: Option<PathBuf>,

    /// Output directory (overrides the configuration)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output layout (overrides the configuration)
    #[arg(long)]
    layout: Option<Layout>,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialize tracing subscriber based on verbosity level.
///
/// Verbosity levels:
/// - 0: No tracing output
/// - 1 (-v): INFO level
/// - 2 (-vv): DEBUG level
/// - 3+ (-vvv): TRACE level, with file and line numbers from 4
///
/// `RUST_LOG` overrides the level chosen here.
fn init_tracing(verbose: u8) {
    if verbose == 0 {
        return;
    }

    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            1 => "warn,pojobuilder_gen=info".to_string(),
            2 => "warn,pojobuilder_gen=debug".to_string(),
            _ => "debug,pojobuilder_gen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(verbose >= 4)
                .with_line_number(verbose >= 4)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn load_descriptors(path: &Path) -> Result<Vec<TargetType>, GeneratorError> {
    let content = fs::read_to_string(path).map_err(|e| GeneratorError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| GeneratorError::DescriptorError {
        path: path.display().to_string(),
        source: e,
    })
}

fn run(cli: &Cli) -> Result<GenerationReport, GeneratorError> {
    if let Some(descriptors) = &cli.descriptors {
        let targets = load_descriptors(descriptors)?;
        info!(targets = targets.len(), path = %descriptors.display(), "loaded descriptors");
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from("src/builders"));
        return generate_targets(
            &targets,
            &output,
            cli.layout.unwrap_or_default(),
            cli.dry_run,
        );
    }

    let mut config = GeneratorConfig::load(&cli.config)?;
    if let Some(output) = &cli.output {
        config.output.dir = output.clone();
    }
    if let Some(layout) = cli.layout {
        config.output.layout = layout;
    }
    info!(
        targets = config.targets.len(),
        output_dir = %config.output.dir.display(),
        layout = %config.output.layout,
        "loaded configuration"
    );
    generate_from_config(&config, cli.dry_run)
}

fn print_summary(report: &GenerationReport, dry_run: bool) {
    for name in report.builder_names() {
        eprintln!("{} {}", "generated".green().bold(), name);
    }
    for diagnostic in &report.diagnostics {
        match diagnostic.subject() {
            Some(subject) => eprintln!(
                "{} {} ({}): {}",
                "rejected".red().bold(),
                diagnostic.target(),
                subject.yellow(),
                diagnostic
            ),
            None => eprintln!(
                "{} {}: {}",
                "rejected".red().bold(),
                diagnostic.target(),
                diagnostic
            ),
        }
    }
    if !dry_run && !report.files.is_empty() {
        eprintln!(
            "{} {} file(s)",
            "wrote".bold(),
            report.files.len()
        );
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(report) => {
            print_summary(&report, cli.dry_run);
            if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

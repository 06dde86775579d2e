//! Command-line interface for the analyzer.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::analyzer::{FailurePolicy, WebPartAnalyzer};
use crate::error::{AnalyzerError, Result};
use crate::fingerprint::create_default_fingerprints;
use crate::mapping::PageTransformation;
use crate::yaml::{generate_yaml, load_records, save_yaml};

/// Web part analyzer - Detect legacy web part types and the properties to migrate.
#[derive(Parser)]
#[command(name = "webpart-analyzer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze exported web part records.
    Analyze {
        /// YAML file with a `web_parts` list
        records: PathBuf,

        /// Transformation mapping (.xml or .yaml)
        #[arg(short, long)]
        mapping: PathBuf,

        /// Output file for the YAML report (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stop at the first web part that cannot be analyzed
        #[arg(long)]
        strict: bool,
    },

    /// Print the property fingerprints used for non-exportable web parts.
    Fingerprints,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            records,
            mapping,
            output,
            strict,
        } => analyze_command(&records, &mapping, output.as_deref(), strict),
        Commands::Fingerprints => {
            fingerprints_command();
            Ok(())
        }
    }
}

/// Fail early for input files that do not exist.
fn require_file(path: &Path, what: &str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(AnalyzerError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{what} does not exist: {}", path.display()),
        )))
    }
}

/// Execute the analyze command.
fn analyze_command(
    records_path: &Path,
    mapping_path: &Path,
    output: Option<&Path>,
    strict: bool,
) -> Result<()> {
    require_file(records_path, "Records file")?;
    require_file(mapping_path, "Mapping file")?;

    let mapping = PageTransformation::from_file(mapping_path)?;
    let records = load_records(records_path)?;
    let analyzer = WebPartAnalyzer::with_mapping(mapping);
    let policy = if strict {
        FailurePolicy::Abort
    } else {
        FailurePolicy::Skip
    };

    eprintln!(
        "{} {} web parts from {}",
        style("Analyzing").bold(),
        style(records.len()).cyan(),
        style(records_path.display()).green()
    );

    let pb = ProgressBar::new(records.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green} {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let report = match analyzer.analyze_all_with_progress(&records, policy, |n| {
        pb.set_position(n as u64);
    }) {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    for (type_name, count) in report.type_counts() {
        eprintln!("  {}: {}", style(type_name).green(), count);
    }
    if !report.warnings.is_empty() {
        eprintln!(
            "  Warnings: {}",
            style(report.warnings.len()).yellow().bold()
        );
        for warning in &report.warnings {
            eprintln!("    {}", style(warning).yellow());
        }
    }

    match output {
        Some(path) => {
            save_yaml(&report, path)?;
            eprintln!();
            eprintln!("{} {}", style("Saved to:").green().bold(), path.display());
        }
        None => print!("{}", generate_yaml(&report)?),
    }

    Ok(())
}

/// Execute the fingerprints command.
fn fingerprints_command() {
    let table = create_default_fingerprints();
    for (index, rule) in table.rules().iter().enumerate() {
        println!(
            "{:>2}. {} <- {}",
            index + 1,
            style(rule.web_part_type).cyan(),
            rule.required_keys.join(", ")
        );
    }
}

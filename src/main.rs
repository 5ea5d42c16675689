//! Varfish exome prioritizer CLI shell.
//!
//! VCF ingestion, database construction/serving and rendering are external
//! collaborators (out of scope here, see `crate`-level docs); this binary
//! only drives the analysis core directly off a JSON fixture, primarily as
//! a smoke-test harness and worked example for embedders.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use varfish_exome_prioritizer::aggregate;
use varfish_exome_prioritizer::common::{Args as CommonArgs, ModeOfInheritance};
use varfish_exome_prioritizer::err::AppError;
use varfish_exome_prioritizer::filter::{FrequencyFilter, InheritanceFilter, QualityFilter};
use varfish_exome_prioritizer::inheritance::ModeFrequencyCeilings;
use varfish_exome_prioritizer::model::{Individual, Pedigree, VariantEvaluation};
use varfish_exome_prioritizer::runner::{Analysis, AnalysisRunner, AnalysisStep, SimpleRunner};

/// CLI parser based on clap.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Variant filtering, inheritance analysis and gene prioritization",
    long_about = "Runs the variant/gene filtering, inheritance compatibility and gene ranking core over a JSON input fixture"
)]
struct Cli {
    /// Commonly used arguments.
    #[command(flatten)]
    common: CommonArgs,

    /// The sub command to run.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run an analysis over a JSON fixture and print the ranked gene list.
    Analyze(analyze::Args),
}

mod analyze {
    use super::*;

    #[derive(Debug, clap::Args)]
    pub struct Args {
        /// Path to a JSON file describing the pedigree, variants and
        /// analysis configuration (see [`AnalysisInput`]).
        pub input: PathBuf,

        /// Minimum variant quality to pass the Quality Filter.
        #[arg(long, default_value_t = 20.0)]
        pub min_quality: f32,

        /// Maximum population frequency (percent) to pass the Frequency
        /// Filter.
        #[arg(long, default_value_t = 1.0)]
        pub max_frequency: f32,
    }

    /// The JSON shape `analyze` reads: a pedigree, an annotated variant
    /// list, and the mode of inheritance to rank against.
    #[derive(serde::Deserialize)]
    pub struct AnalysisInput {
        pub individuals: Vec<Individual>,
        pub variants: Vec<VariantEvaluation>,
        pub mode: ModeOfInheritance,
    }

    /// Load the JSON fixture, composing I/O and parse failures into one
    /// `anyhow::Error` with file-path context before translating to the
    /// crate's own [`AppError`] at this call site's boundary.
    fn load_input(path: &PathBuf) -> anyhow::Result<AnalysisInput> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let input = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing analysis input from {}", path.display()))?;
        Ok(input)
    }

    pub fn run(_common: &CommonArgs, args: &Args) -> Result<(), AppError> {
        let input =
            load_input(&args.input).map_err(|e| AppError::InvalidConfiguration(e.to_string()))?;

        let pedigree = Pedigree::new(input.individuals)
            .map_err(|e| AppError::InvalidConfiguration(e.to_string()))?;

        let quality_filter = QualityFilter::new(args.min_quality)
            .map_err(|e| AppError::InvalidConfiguration(e.to_string()))?;
        let frequency_filter = FrequencyFilter::new(args.max_frequency, false)
            .map_err(|e| AppError::InvalidConfiguration(e.to_string()))?;
        let inheritance_filter = InheritanceFilter::new(
            pedigree.clone(),
            [target_mode(input.mode)].into(),
            ModeFrequencyCeilings::new(),
        );

        let analysis = Analysis::builder(pedigree.clone(), input.mode)
            .step(AnalysisStep::VariantFilter(Box::new(quality_filter)))
            .step(AnalysisStep::VariantFilter(Box::new(frequency_filter)))
            .step(AnalysisStep::GeneFilter(Box::new(inheritance_filter)))
            .build()
            .map_err(|e| AppError::InvalidConfiguration(e.to_string()))?;

        let mut genes = SimpleRunner
            .run(&analysis, input.variants)
            .map_err(|e| AppError::AnalysisFailed(e.to_string()))?;

        aggregate::aggregate(&mut genes, &pedigree, input.mode);

        serde_json::to_writer_pretty(std::io::stdout(), &genes)
            .map_err(|e| AppError::AnalysisFailed(e.to_string()))?;
        println!();

        Ok(())
    }

    fn target_mode(
        mode: ModeOfInheritance,
    ) -> varfish_exome_prioritizer::model::InheritanceMode {
        use varfish_exome_prioritizer::model::InheritanceMode as Engine;
        match mode {
            ModeOfInheritance::AutosomalDominant => Engine::AutosomalDominant,
            ModeOfInheritance::AutosomalRecessive => Engine::AutosomalRecessive,
            ModeOfInheritance::XDominant => Engine::XDominant,
            ModeOfInheritance::XRecessive => Engine::XRecessive,
            ModeOfInheritance::Mitochondrial => Engine::Mitochondrial,
            ModeOfInheritance::Any => Engine::Any,
        }
    }
}

fn main() -> std::process::ExitCode {
    use std::process::Termination;

    let cli = Cli::parse();

    let collector = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(match cli.common.verbose.log_level() {
            Some(level) => match level {
                log::Level::Error => tracing::Level::ERROR,
                log::Level::Warn => tracing::Level::WARN,
                log::Level::Info => tracing::Level::INFO,
                log::Level::Debug => tracing::Level::DEBUG,
                log::Level::Trace => tracing::Level::TRACE,
            },
            None => tracing::Level::INFO,
        })
        .compact()
        .finish();

    let result = tracing::subscriber::with_default(collector, || match &cli.command {
        Commands::Analyze(args) => analyze::run(&cli.common, args),
    });

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            e.report()
        }
    }
}

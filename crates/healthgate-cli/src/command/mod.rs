use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use healthgate_analysis::threshold::Threshold;

use self::{analyze::AnalyzeArg, phases::PhasesArg, report::ReportArg};
use crate::logging;

mod analyze;
mod phases;
mod report;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compute time above threshold for every phase and write it as JSON
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Print per-phase tables of total, subgroup and player results
    Report(#[clap(flatten)] ReportArg),
    /// List the phases of an encounter
    Phases(#[clap(flatten)] PhasesArg),
}

/// Encounter input shared by the analysis commands
#[derive(Debug, Clone, Args)]
pub(crate) struct EncounterArg {
    /// Path to the encounter JSON file
    pub document: PathBuf,

    /// Health threshold in percent (0-100); time strictly above it counts
    #[arg(long, short, default_value_t = Threshold::DEFAULT)]
    pub threshold: Threshold,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.verbose);

    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Phases(arg) => phases::run(&arg)?,
    }
    Ok(())
}

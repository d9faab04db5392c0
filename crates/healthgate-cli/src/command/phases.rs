use std::path::PathBuf;

use chrono::Utc;
use healthgate_analysis::duration::format_duration;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PhasesArg {
    /// Path to the encounter JSON file
    document: PathBuf,
}

pub(crate) fn run(arg: &PhasesArg) -> anyhow::Result<()> {
    let started = Utc::now();
    let document = util::read_encounter_file(&arg.document)?;

    println!(
        "  {:<32} {:>10} {:>10} {:>10} {:>9} {:>14}",
        "Phase", "Start", "End", "Duration", "Breakbar", "Span"
    );
    println!("  {}", "-".repeat(90));
    for phase in &document.phases {
        let (from, to) = phase.span_fraction(document.duration_ms);
        println!(
            "  {:<32} {:>10} {:>10} {:>10} {:>9} {:>6.1}%-{:>5.1}%",
            phase.name,
            format_duration(phase.start),
            format_duration(phase.end),
            format_duration(phase.duration_ms()),
            if phase.breakbar_phase { "yes" } else { "no" },
            from * 100.0,
            to * 100.0,
        );
    }

    let elapsed = Utc::now() - started;
    tracing::info!(
        phases = document.phases.len(),
        players = document.players.len(),
        elapsed_ms = elapsed.num_milliseconds(),
        "listed phases"
    );
    Ok(())
}

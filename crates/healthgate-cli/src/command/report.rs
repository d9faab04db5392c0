//! Tabular report of time above threshold
//!
//! Prints the encounter summary followed by one breakdown table per selected
//! phase: the squad total, every subgroup, then every player.

use chrono::Utc;
use healthgate_analysis::{
    breakdown::{BreakdownRow, PhaseBreakdown},
    duration::{format_average_duration, format_duration},
    encounter::EncounterSummary,
    extract::{self, HealthReport, PhaseReport, SelectPhaseError},
};
use healthgate_stats::descriptive::DescriptiveStats;

use super::EncounterArg;
use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    #[command(flatten)]
    encounter: EncounterArg,

    /// Phase to report (defaults to the first phase)
    #[arg(long, short, conflicts_with = "all_phases")]
    phase: Option<String>,

    /// Report every phase
    #[arg(long)]
    all_phases: bool,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let document = util::read_encounter_file(&arg.encounter.document)?;
    let threshold = arg.encounter.threshold;

    let started = Utc::now();
    let report = extract::extract(&document, threshold.as_f64());
    let phases = selected_phases(&report, arg.phase.as_deref(), arg.all_phases)?;
    let elapsed = Utc::now() - started;
    tracing::info!(
        %threshold,
        phases = phases.len(),
        players = report.players.len(),
        elapsed_ms = elapsed.num_milliseconds(),
        "analysis complete"
    );

    print_summary(&EncounterSummary::from_document(&document));
    println!("Health threshold: {threshold}%");
    println!();

    if phases.is_empty() {
        println!("(no phases)");
    }
    for phase in phases {
        print_phase(&report, phase);
        println!();
    }

    Ok(())
}

/// Phases to print: all of them, the one named `phase`, or the first one.
///
/// A document without phases yields nothing unless a phase was named.
fn selected_phases<'a>(
    report: &'a HealthReport,
    phase: Option<&str>,
    all_phases: bool,
) -> Result<Vec<&'a PhaseReport>, SelectPhaseError> {
    if all_phases || (phase.is_none() && report.phases.is_empty()) {
        return Ok(report.phases.iter().collect());
    }
    Ok(vec![report.select_phase(phase)?])
}

fn print_summary(summary: &EncounterSummary) {
    let outcome = if summary.success { "Success" } else { "Failure" };
    let mode = if summary.is_cm { " [CM]" } else { "" };
    println!("{}{mode} - {outcome}", summary.fight_name);
    println!("==========================================");
    println!(
        "Duration: {}  Players: {}  Phases: {}",
        format_duration(summary.duration_ms),
        summary.player_count,
        summary.phase_count,
    );
}

fn print_phase(report: &HealthReport, phase: &PhaseReport) {
    let breakdown = PhaseBreakdown::new(phase, &report.players);
    let breakbar = if phase.breakbar_phase { " (breakbar)" } else { "" };

    println!("{}{breakbar} [{}]", phase.name, phase.id);
    println!(
        "  {} - {} (duration {})",
        format_duration(phase.start),
        format_duration(phase.end),
        format_duration(phase.duration_ms()),
    );
    println!();
    print_table_header();
    print_table_separator();
    for row in &breakdown.rows {
        print_table_row(row);
    }
    print_table_separator();

    match breakdown.player_percent_stats() {
        Some(stats) => print_spread(&stats),
        None => println!("  (no players)"),
    }
}

fn print_table_header() {
    println!(
        "  {:<28} {:>6} {:>10} {:>12}",
        "Name", "Group", "Above%", "Time above"
    );
}

fn print_table_separator() {
    // name(28) + group(6) + percent(10) + time(12) + spaces(3)
    println!("  {}", "-".repeat(59));
}

fn print_table_row(row: &BreakdownRow) {
    let name = if row.has_commander_tag == Some(true) {
        format!("* {}", row.name)
    } else {
        row.name.clone()
    };
    let group = row.group.map_or_else(String::new, |g| g.to_string());
    let time = if row.is_player {
        format_average_duration(row.ms_above_threshold)
    } else {
        format!("~{}", format_average_duration(row.ms_above_threshold))
    };
    println!(
        "  {:<28} {:>6} {:>9.1}% {:>12}",
        name, group, row.percent_above_threshold, time,
    );
}

fn print_spread(stats: &DescriptiveStats) {
    println!(
        "  Player spread: min {:.1}%  median {:.1}%  max {:.1}%",
        stats.min, stats.median, stats.max,
    );
}

#[cfg(test)]
mod tests {
    use healthgate_analysis::encounter::EncounterDocument;

    use super::*;

    fn report(json: &str) -> HealthReport {
        let document: EncounterDocument = serde_json::from_str(json).unwrap();
        extract::extract(&document, 90.0)
    }

    const TWO_PHASES: &str = r#"{
        "durationMS": 4000,
        "players": [{
            "account": "Alpha.1111", "name": "Alpha", "profession": "Chronomancer", "group": 1,
            "healthPercents": [[0, 100.0], [2000, 50.0]]
        }],
        "phases": [
            { "name": "Full Fight", "start": 0, "end": 4000 },
            { "name": "Phase 2", "start": 2000, "end": 4000 }
        ]
    }"#;

    #[test]
    fn test_no_phases_selects_nothing() {
        let report = report(r#"{ "durationMS": 1000 }"#);
        assert!(selected_phases(&report, None, false).unwrap().is_empty());
        assert!(selected_phases(&report, None, true).unwrap().is_empty());
    }

    #[test]
    fn test_named_phase_without_phases_is_an_error() {
        let report = report(r#"{ "durationMS": 1000 }"#);
        assert_eq!(
            selected_phases(&report, Some("Full Fight"), false).unwrap_err(),
            SelectPhaseError::NoPhases
        );
    }

    #[test]
    fn test_phase_selection() {
        let report = report(TWO_PHASES);

        let first = selected_phases(&report, None, false).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].name, "Full Fight");

        let named = selected_phases(&report, Some("Phase 2"), false).unwrap();
        assert_eq!(named[0].name, "Phase 2");

        let all = selected_phases(&report, None, true).unwrap();
        assert_eq!(all.len(), 2);

        assert!(matches!(
            selected_phases(&report, Some("Phase 3"), false),
            Err(SelectPhaseError::UnknownPhase { .. })
        ));
    }
}

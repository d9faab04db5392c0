use std::path::PathBuf;

use chrono::{DateTime, Utc};
use healthgate_analysis::{
    extract::{self, HealthReport},
    threshold::Threshold,
};
use serde::Serialize;

use super::EncounterArg;
use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    #[command(flatten)]
    encounter: EncounterArg,

    /// Output file path (stdout if omitted)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Extend every clipped series with a sample at its phase end
    #[arg(long)]
    pad_series: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeOutput {
    analyzed_at: DateTime<Utc>,
    threshold: Threshold,
    #[serde(flatten)]
    report: HealthReport,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let EncounterArg {
        document,
        threshold,
    } = &arg.encounter;
    let document = util::read_encounter_file(document)?;

    let started = Utc::now();
    let mut report = extract::extract(&document, threshold.as_f64());
    if arg.pad_series {
        report.phases = report
            .phases
            .into_iter()
            .map(|phase| phase.with_padded_series())
            .collect();
    }
    let elapsed = Utc::now() - started;
    tracing::info!(
        %threshold,
        phases = report.phases.len(),
        players = report.players.len(),
        elapsed_ms = elapsed.num_milliseconds(),
        "analysis complete"
    );

    let output = AnalyzeOutput {
        analyzed_at: started,
        threshold: *threshold,
        report,
    };
    util::write_json(&output, arg.output.as_deref())
}

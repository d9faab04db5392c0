//! Per-phase, per-player time above a health threshold
//!
//! [`extract`] turns an [`EncounterDocument`] into a [`HealthReport`]: for every
//! phase and every player it clips the player's health series to the phase,
//! integrates the time spent strictly above the threshold, and ranks the
//! players by that time.
//!
//! # Clipping
//!
//! Each clipped series starts with a synthesized sample at the phase start
//! carrying the player's health at that instant, followed by the raw samples
//! with `start < time <= end`. Integration then runs over `[start, end)`.
//!
//! # Examples
//!
//! ```
//! use healthgate_analysis::{encounter::EncounterDocument, extract::extract};
//!
//! let document: EncounterDocument = serde_json::from_str(r#"{
//!     "durationMS": 2000,
//!     "players": [{
//!         "account": "A.1", "name": "A", "profession": "Guardian", "group": 1,
//!         "healthPercents": [[0, 100], [1000, 80], [2000, 95]]
//!     }],
//!     "phases": [{ "name": "Full Fight", "start": 0, "end": 2000 }]
//! }"#)?;
//!
//! let report = extract(&document, 90.0);
//! let result = &report.phases[0].health_data[0];
//! assert_eq!(result.ms_above_threshold, 1000);
//! assert_eq!(result.percent_above_threshold, 50.0);
//! # Ok::<(), serde_json::Error>(())
//! ```

use healthgate_stats::{
    interval::duration_above_threshold,
    step::{self, Sample},
};
use serde::Serialize;

use crate::{
    encounter::{self, EncounterDocument, PhaseRecord, PlayerRecord},
    phase_id::{PhaseId, PhaseIdGenerator},
};

/// Result of analyzing a whole encounter at one threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub players: Vec<PlayerInfo>,
    /// Encounter duration in milliseconds
    pub duration: i64,
    pub phases: Vec<PhaseReport>,
}

/// Player metadata carried into the report (the health series is dropped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub account: String,
    pub name: String,
    pub profession: String,
    pub group: u32,
    pub has_commander_tag: bool,
}

impl From<&PlayerRecord> for PlayerInfo {
    fn from(player: &PlayerRecord) -> Self {
        Self {
            account: player.account.clone(),
            name: player.name.clone(),
            profession: player.profession.clone(),
            group: player.group,
            has_commander_tag: player.has_commander_tag,
        }
    }
}

/// One phase with every player's result, best first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseReport {
    pub id: PhaseId,
    pub name: String,
    pub start: i64,
    pub end: i64,
    pub breakbar_phase: bool,
    /// Sorted by `ms_above_threshold`, descending
    pub health_data: Vec<PhaseResult>,
}

/// A single player's result within a phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseResult {
    /// Account of the player
    pub label: String,
    pub is_player: bool,
    /// Health series clipped to the phase and anchored at its start
    pub health_percents: Vec<Sample>,
    pub ms_above_threshold: i64,
    pub percent_above_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SelectPhaseError {
    #[display("encounter has no phases")]
    NoPhases,
    #[display("no phase named '{name}'")]
    UnknownPhase { name: String },
}

/// Analyzes every phase of `document` against `threshold`.
///
/// Phase ids are drawn from a freshly seeded [`PhaseIdGenerator`]; use
/// [`extract_with_ids`] to control them.
#[must_use]
pub fn extract(document: &EncounterDocument, threshold: f64) -> HealthReport {
    extract_with_ids(document, threshold, &mut PhaseIdGenerator::new())
}

/// Like [`extract`], drawing phase ids from `ids`.
#[must_use]
pub fn extract_with_ids(
    document: &EncounterDocument,
    threshold: f64,
    ids: &mut PhaseIdGenerator,
) -> HealthReport {
    let phases = document
        .phases
        .iter()
        .map(|phase| {
            tracing::debug!(
                phase = %phase.name,
                start = phase.start,
                end = phase.end,
                players = document.players.len(),
                "analyzing phase"
            );
            extract_phase(phase, &document.players, threshold, ids.next_id())
        })
        .collect();

    HealthReport {
        players: document.players.iter().map(PlayerInfo::from).collect(),
        duration: document.duration_ms,
        phases,
    }
}

fn extract_phase(
    phase: &PhaseRecord,
    players: &[PlayerRecord],
    threshold: f64,
    id: PhaseId,
) -> PhaseReport {
    let mut health_data = players
        .iter()
        .map(|player| phase_result(player, phase, threshold))
        .collect::<Vec<_>>();
    // Stable, so ties keep document order
    health_data.sort_by(|a, b| b.ms_above_threshold.cmp(&a.ms_above_threshold));

    PhaseReport {
        id,
        name: phase.name.clone(),
        start: phase.start,
        end: phase.end,
        breakbar_phase: phase.breakbar_phase,
        health_data,
    }
}

/// Computes one player's result for one phase.
#[must_use]
pub fn phase_result(player: &PlayerRecord, phase: &PhaseRecord, threshold: f64) -> PhaseResult {
    let clipped = step::anchored_window(&player.health_percents, phase.start, phase.end);
    let ms_above_threshold = duration_above_threshold(&clipped, phase.start, phase.end, threshold);
    let percent_above_threshold = percent_of(ms_above_threshold, phase.end - phase.start);

    tracing::trace!(
        account = %player.account,
        phase = %phase.name,
        ms_above_threshold,
        percent_above_threshold,
        "player result"
    );

    PhaseResult {
        label: player.account.clone(),
        is_player: true,
        health_percents: clipped,
        ms_above_threshold,
        percent_above_threshold,
    }
}

#[expect(clippy::cast_precision_loss)]
fn percent_of(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

impl HealthReport {
    /// Returns the first phase named `name`.
    #[must_use]
    pub fn phase_by_name(&self, name: &str) -> Option<&PhaseReport> {
        self.phases.iter().find(|phase| phase.name == name)
    }

    /// Selects the phase named `name`, or the first phase when `name` is `None`.
    pub fn select_phase(&self, name: Option<&str>) -> Result<&PhaseReport, SelectPhaseError> {
        match name {
            None => self.phases.first().ok_or(SelectPhaseError::NoPhases),
            Some(_) if self.phases.is_empty() => Err(SelectPhaseError::NoPhases),
            Some(name) => self
                .phase_by_name(name)
                .ok_or_else(|| SelectPhaseError::UnknownPhase {
                    name: name.to_owned(),
                }),
        }
    }

    /// Looks up the player a result belongs to.
    #[must_use]
    pub fn player(&self, account: &str) -> Option<&PlayerInfo> {
        self.players.iter().find(|player| player.account == account)
    }
}

impl PhaseReport {
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        (self.end - self.start).max(0)
    }

    /// Position of the phase within an encounter of `total` milliseconds.
    ///
    /// See [`encounter::span_fraction`].
    #[must_use]
    pub fn span_fraction(&self, total: i64) -> (f64, f64) {
        encounter::span_fraction(self.start, self.end, total)
    }

    /// Replaces each clipped series with one that reaches the phase end.
    ///
    /// See [`step::extend_to`].
    #[must_use]
    pub fn with_padded_series(mut self) -> Self {
        for result in &mut self.health_data {
            result.health_percents = step::extend_to(&result.health_percents, self.end);
        }
        self
    }
}

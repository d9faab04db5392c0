//! Encounter documents as produced by the upstream log parser
//!
//! An encounter document describes one fight: the health percentage of every
//! player over time and the named phases the fight is split into.
//!
//! # Serialization
//!
//! Field names follow the parser's camelCase JSON. Health samples are
//! `[ms, percent]` pairs:
//!
//! ```json
//! {
//!   "durationMS": 183000,
//!   "success": true,
//!   "fightName": "Vale Guardian",
//!   "players": [
//!     {
//!       "account": "Example.1234",
//!       "name": "Example Character",
//!       "profession": "Guardian",
//!       "group": 1,
//!       "hasCommanderTag": false,
//!       "healthPercents": [[0, 100.0], [4200, 91.3]]
//!     }
//!   ],
//!   "phases": [
//!     { "name": "Full Fight", "start": 0, "end": 183000, "breakbarPhase": false }
//!   ]
//! }
//! ```
//!
//! Unknown fields are ignored. Metadata fields and the `players`/`phases`
//! lists default when absent.

use healthgate_stats::step::Sample;
use serde::{Deserialize, Serialize};

/// A parsed encounter log.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterDocument {
    /// Total encounter duration in milliseconds
    #[serde(
        rename = "durationMS",
        default,
        deserialize_with = "healthgate_stats::millis::deserialize"
    )]
    pub duration_ms: i64,
    /// Whether the encounter was won
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub fight_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fight_icon: Option<String>,
    /// Whether the encounter was played in challenge mode
    #[serde(rename = "isCM", default)]
    pub is_cm: bool,
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
    #[serde(default)]
    pub phases: Vec<PhaseRecord>,
}

/// A player and their health over the whole encounter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    /// Unique account identifier
    pub account: String,
    /// Character display name
    pub name: String,
    pub profession: String,
    /// Subgroup (party) the player belongs to
    pub group: u32,
    #[serde(default)]
    pub has_commander_tag: bool,
    /// Health percentage samples, sorted by time
    #[serde(default)]
    pub health_percents: Vec<Sample>,
}

/// A named time window within the encounter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRecord {
    pub name: String,
    /// Phase start in milliseconds
    #[serde(deserialize_with = "healthgate_stats::millis::deserialize")]
    pub start: i64,
    /// Phase end in milliseconds
    #[serde(deserialize_with = "healthgate_stats::millis::deserialize")]
    pub end: i64,
    #[serde(default)]
    pub breakbar_phase: bool,
}

impl PhaseRecord {
    /// Length of the phase in milliseconds, zero for inverted phases.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        (self.end - self.start).max(0)
    }

    /// Position of the phase within an encounter of `total` milliseconds.
    ///
    /// See [`span_fraction`].
    #[must_use]
    pub fn span_fraction(&self, total: i64) -> (f64, f64) {
        span_fraction(self.start, self.end, total)
    }
}

/// Position of the window `[start, end]` within an encounter of `total`
/// milliseconds, as `(start, end)` fractions clamped to `[0, 1]`.
///
/// Both fractions are `0` when `total` is not positive.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn span_fraction(start: i64, end: i64, total: i64) -> (f64, f64) {
    if total <= 0 {
        return (0.0, 0.0);
    }
    let fraction = |t: i64| (t as f64 / total as f64).clamp(0.0, 1.0);
    (fraction(start), fraction(end))
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("health series of player '{account}' is not sorted by time at sample {index}")]
pub struct UnsortedSeriesError {
    pub account: String,
    /// Index of the first sample that is earlier than its predecessor
    pub index: usize,
}

impl EncounterDocument {
    /// Checks that every player's health series is sorted by time.
    ///
    /// Sampling assumes sorted series; this lets callers reject malformed
    /// documents up front instead of getting meaningless results.
    pub fn validate(&self) -> Result<(), UnsortedSeriesError> {
        for player in &self.players {
            if let Some(pos) = player
                .health_percents
                .windows(2)
                .position(|w| w[1].time < w[0].time)
            {
                return Err(UnsortedSeriesError {
                    account: player.account.clone(),
                    index: pos + 1,
                });
            }
        }
        Ok(())
    }
}

/// Headline facts about an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterSummary {
    pub fight_name: String,
    pub success: bool,
    pub is_cm: bool,
    pub duration_ms: i64,
    pub player_count: usize,
    pub phase_count: usize,
}

impl EncounterSummary {
    #[must_use]
    pub fn from_document(document: &EncounterDocument) -> Self {
        Self {
            fight_name: document.fight_name.clone(),
            success: document.success,
            is_cm: document.is_cm,
            duration_ms: document.duration_ms,
            player_count: document.players.len(),
            phase_count: document.phases.len(),
        }
    }
}

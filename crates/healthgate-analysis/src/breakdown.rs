//! Side-by-side rows for one phase: total, subgroups, then players
//!
//! A [`PhaseBreakdown`] combines the aggregation layer with the per-player
//! results of a phase into the flat list a presentation layer shows as tabs or
//! table rows:
//!
//! ```text
//! total
//! subgroup-N ...   (highest average percent first)
//! player ...       (most time above threshold first)
//! ```

use healthgate_stats::descriptive::DescriptiveStats;
use serde::Serialize;

use crate::{
    aggregate::{self, Average},
    extract::{PhaseReport, PlayerInfo},
};

pub const TOTAL_KEY: &str = "total";

/// A labelled result row. Aggregate rows carry no player metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRow {
    /// `total`, `subgroup-N` or the player's account
    pub key: String,
    pub name: String,
    pub profession: Option<String>,
    pub group: Option<u32>,
    pub has_commander_tag: Option<bool>,
    pub percent_above_threshold: f64,
    pub ms_above_threshold: f64,
    pub is_player: bool,
}

impl BreakdownRow {
    fn aggregate(key: String, name: String, average: Average) -> Self {
        Self {
            key,
            name,
            profession: None,
            group: None,
            has_commander_tag: None,
            percent_above_threshold: average.percent_above_threshold,
            ms_above_threshold: average.ms_above_threshold,
            is_player: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseBreakdown {
    pub rows: Vec<BreakdownRow>,
}

impl PhaseBreakdown {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(phase: &PhaseReport, players: &[PlayerInfo]) -> Self {
        let total = aggregate::total_average(&phase.health_data);
        let subgroups = aggregate::subgroup_averages(&phase.health_data, players);

        let mut rows = Vec::with_capacity(1 + subgroups.len() + phase.health_data.len());
        rows.push(BreakdownRow::aggregate(
            TOTAL_KEY.to_owned(),
            "Total".to_owned(),
            total,
        ));
        rows.extend(subgroups.iter().map(|subgroup| {
            BreakdownRow::aggregate(
                subgroup.label(),
                format!("Group {}", subgroup.group),
                subgroup.average,
            )
        }));
        rows.extend(phase.health_data.iter().filter_map(|result| {
            let player = players.iter().find(|p| p.account == result.label)?;
            Some(BreakdownRow {
                key: player.account.clone(),
                name: player.name.clone(),
                profession: Some(player.profession.clone()),
                group: Some(player.group),
                has_commander_tag: Some(player.has_commander_tag),
                percent_above_threshold: result.percent_above_threshold,
                ms_above_threshold: result.ms_above_threshold as f64,
                is_player: true,
            })
        }));

        Self { rows }
    }

    pub fn player_rows(&self) -> impl Iterator<Item = &BreakdownRow> {
        self.rows.iter().filter(|row| row.is_player)
    }

    /// Spread of the player percentages, `None` without player rows.
    #[must_use]
    pub fn player_percent_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.player_rows().map(|row| row.percent_above_threshold))
    }
}

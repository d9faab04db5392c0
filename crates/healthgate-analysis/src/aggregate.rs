//! Total and per-subgroup averages of phase results

use std::collections::{BTreeMap, HashMap};

use healthgate_stats::descriptive;
use serde::Serialize;

use crate::extract::{PhaseResult, PlayerInfo};

/// Mean time above threshold over a set of phase results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Average {
    pub percent_above_threshold: f64,
    pub ms_above_threshold: f64,
}

/// [`Average`] of the results belonging to one subgroup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubgroupAverage {
    pub group: u32,
    #[serde(flatten)]
    pub average: Average,
}

impl SubgroupAverage {
    /// Label used for the subgroup in reports, e.g. `subgroup-3`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("subgroup-{}", self.group)
    }
}

impl Average {
    #[expect(clippy::cast_precision_loss)]
    fn of<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a PhaseResult>,
        I::IntoIter: Clone,
    {
        let results = results.into_iter();
        Self {
            percent_above_threshold: descriptive::mean(
                results.clone().map(|r| r.percent_above_threshold),
            )
            .unwrap_or(0.0),
            ms_above_threshold: descriptive::mean(results.map(|r| r.ms_above_threshold as f64))
                .unwrap_or(0.0),
        }
    }
}

/// Averages every result of a phase; zero when there are none.
///
/// # Examples
///
/// ```
/// # use healthgate_analysis::aggregate::total_average;
/// let average = total_average(&[]);
/// assert_eq!(average.percent_above_threshold, 0.0);
/// assert_eq!(average.ms_above_threshold, 0.0);
/// ```
#[must_use]
pub fn total_average(results: &[PhaseResult]) -> Average {
    Average::of(results)
}

/// Averages phase results per subgroup, highest average percent first.
///
/// Results are matched to players by account; results without a matching
/// player are left out. Subgroups with equal averages are ordered by group id.
#[must_use]
pub fn subgroup_averages(results: &[PhaseResult], players: &[PlayerInfo]) -> Vec<SubgroupAverage> {
    let group_of = players
        .iter()
        .map(|player| (player.account.as_str(), player.group))
        .collect::<HashMap<_, _>>();

    let mut members = BTreeMap::<u32, Vec<&PhaseResult>>::new();
    for result in results {
        let Some(&group) = group_of.get(result.label.as_str()) else {
            tracing::trace!(account = %result.label, "no player for result, skipping");
            continue;
        };
        members.entry(group).or_default().push(result);
    }

    let mut averages = members
        .into_iter()
        .map(|(group, results)| SubgroupAverage {
            group,
            average: Average::of(results.iter().copied()),
        })
        .collect::<Vec<_>>();
    averages.sort_by(|a, b| {
        b.average
            .percent_above_threshold
            .total_cmp(&a.average.percent_above_threshold)
    });
    averages
}

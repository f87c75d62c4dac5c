//! Share of states with large year-over-year gains or losses.

use super::differences::DifferenceRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A state "migrates" when its population moves by more than this many people in a year.
pub const MIGRATION_THRESHOLD: i64 = 50_000;

/// Percentages of states with high inbound and outbound migration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationSummary {
    pub inbound_percent: u8,
    pub outbound_percent: u8,
}

/// Classifies a difference table against [`MIGRATION_THRESHOLD`].
///
/// Percentages are relative to the number of distinct states in the table
/// and rounded half to even. An empty table yields `0 / 0`.
pub fn classify_migration(differences: &[DifferenceRecord]) -> MigrationSummary {
    let state_count = differences
        .iter()
        .map(|d| d.state.as_str())
        .collect::<HashSet<_>>()
        .len();
    if state_count == 0 {
        return MigrationSummary::default();
    }

    let high_gain = differences
        .iter()
        .filter(|d| d.population_delta > MIGRATION_THRESHOLD)
        .count();
    let high_loss = differences
        .iter()
        .filter(|d| d.population_delta < -MIGRATION_THRESHOLD)
        .count();

    MigrationSummary {
        inbound_percent: percent(high_gain, state_count),
        outbound_percent: percent(high_loss, state_count),
    }
}

fn percent(count: usize, total: usize) -> u8 {
    let pct = (100.0 * count as f64 / total as f64).round_ties_even();
    pct.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diffs(deltas: &[i64]) -> Vec<DifferenceRecord> {
        deltas
            .iter()
            .enumerate()
            .map(|(i, &delta)| DifferenceRecord {
                state: format!("State {i}"),
                state_id: format!("{i:02}"),
                population: 1_000_000,
                population_delta: delta,
            })
            .collect()
    }

    #[test]
    fn test_five_of_fifty_is_ten_percent() {
        let mut deltas = vec![60_000; 5];
        deltas.extend(std::iter::repeat_n(1_000, 45));
        let summary = classify_migration(&diffs(&deltas));
        assert_eq!(summary.inbound_percent, 10);
        assert_eq!(summary.outbound_percent, 0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let summary = classify_migration(&diffs(&[50_000, -50_000, 50_001, -50_001]));
        assert_eq!(summary.inbound_percent, 25);
        assert_eq!(summary.outbound_percent, 25);
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(classify_migration(&[]), MigrationSummary::default());
    }

    #[test]
    fn test_rounds_half_to_even() {
        // 1 of 8 = 12.5% rounds to 12, 3 of 8 = 37.5% rounds to 38
        let summary = classify_migration(&diffs(&[
            60_000, -60_000, -60_000, -60_000, 0, 0, 0, 0,
        ]));
        assert_eq!(summary.inbound_percent, 12);
        assert_eq!(summary.outbound_percent, 38);
    }

    #[test]
    fn test_all_states_gaining() {
        let summary = classify_migration(&diffs(&[70_000, 80_000, 90_000]));
        assert_eq!(summary.inbound_percent, 100);
    }
}

//! Year-over-year population change per state.

use crate::dataset::PopulationDataset;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One state's population in the selected year and its change from the year before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferenceRecord {
    pub state: String,
    pub state_id: String,
    pub population: u64,
    pub population_delta: i64,
}

/// Computes `population(year) - population(year - 1)` for every state in `year`.
///
/// The two years are joined on `state_id`. A state without a prior-year row
/// is diffed against 0, so its delta equals its population. Callers that
/// want the "no prior year" placeholder for the earliest year must check
/// [`PopulationDataset::is_first_year`] before calling this.
///
/// The result is sorted by delta, largest gain first; equal deltas are
/// ordered by state name.
pub fn compute_differences(dataset: &PopulationDataset, year: i32) -> Vec<DifferenceRecord> {
    let prior: HashMap<&str, u64> = match year.checked_sub(1) {
        Some(prev) => dataset
            .year_slice(prev)
            .iter()
            .map(|r| (r.state_id.as_str(), r.population))
            .collect(),
        None => HashMap::new(),
    };

    let mut differences: Vec<DifferenceRecord> = dataset
        .year_slice(year)
        .iter()
        .map(|r| {
            let previous = prior.get(r.state_id.as_str()).copied().unwrap_or(0);
            DifferenceRecord {
                state: r.state.clone(),
                state_id: r.state_id.clone(),
                population: r.population,
                population_delta: signed(r.population) - signed(previous),
            }
        })
        .collect();

    differences.sort_by(|a, b| {
        b.population_delta
            .cmp(&a.population_delta)
            .then_with(|| a.state.cmp(&b.state))
    });
    differences
}

fn signed(population: u64) -> i64 {
    i64::try_from(population).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::record;

    #[test]
    fn test_california_2019_delta() {
        let ds = PopulationDataset::from_records(vec![
            record("California", "06", 2018, 39_461_588),
            record("California", "06", 2019, 39_512_223),
        ])
        .unwrap();

        let diffs = compute_differences(&ds, 2019);
        assert_eq!(
            diffs,
            vec![DifferenceRecord {
                state: "California".to_owned(),
                state_id: "06".to_owned(),
                population: 39_512_223,
                population_delta: 50_635,
            }]
        );
    }

    #[test]
    fn test_join_ignores_row_order() {
        // Prior year rows are in a different order and one state is missing
        let ds = PopulationDataset::from_records(vec![
            record("Alaska", "02", 2019, 731_545),
            record("Texas", "48", 2019, 28_995_881),
            record("Ohio", "39", 2019, 11_689_100),
            record("Texas", "48", 2018, 28_701_845),
            record("Alaska", "02", 2018, 737_438),
        ])
        .unwrap();

        let diffs = compute_differences(&ds, 2019);
        let by_state: HashMap<&str, i64> = diffs
            .iter()
            .map(|d| (d.state.as_str(), d.population_delta))
            .collect();

        assert_eq!(diffs.len(), 3);
        assert_eq!(by_state.get("Texas"), Some(&294_036));
        assert_eq!(by_state.get("Alaska"), Some(&-5_893));
        assert_eq!(by_state.get("Ohio"), Some(&11_689_100));
    }

    #[test]
    fn test_sorted_descending_with_name_tiebreak() {
        let ds = PopulationDataset::from_records(vec![
            record("Utah", "49", 2018, 100),
            record("Utah", "49", 2019, 110),
            record("Iowa", "19", 2018, 100),
            record("Iowa", "19", 2019, 110),
            record("Maine", "23", 2018, 100),
            record("Maine", "23", 2019, 90),
            record("Idaho", "16", 2018, 100),
            record("Idaho", "16", 2019, 500),
        ])
        .unwrap();

        let diffs = compute_differences(&ds, 2019);
        assert!(
            diffs
                .windows(2)
                .all(|w| matches!(w, [a, b] if a.population_delta >= b.population_delta))
        );
        let order: Vec<&str> = diffs.iter().map(|d| d.state.as_str()).collect();
        assert_eq!(order, vec!["Idaho", "Iowa", "Utah", "Maine"]);
    }

    #[test]
    fn test_unknown_year_yields_nothing() {
        let ds = PopulationDataset::from_records(vec![record("Utah", "49", 2019, 1)]).unwrap();
        assert!(compute_differences(&ds, 1990).is_empty());
    }
}

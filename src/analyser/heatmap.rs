//! Year x state population grid for the heatmap chart.

use crate::dataset::PopulationDataset;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Population per (year, state). Rows follow `years`, columns follow `states`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    pub years: Vec<i32>,
    pub states: Vec<String>,
    pub cells: Vec<Vec<Option<u64>>>,
}

impl HeatmapGrid {
    pub fn get(&self, year: i32, state: &str) -> Option<u64> {
        let row = self.years.iter().position(|&y| y == year)?;
        let col = self.states.iter().position(|s| s == state)?;
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Smallest and largest filled cell, used as the color scale domain.
    pub fn value_range(&self) -> Option<(u64, u64)> {
        let mut values = self.cells.iter().flatten().flatten().copied();
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// Builds the grid over the whole dataset.
///
/// Years ascend, states are alphabetical. A (year, state) pair with several
/// records keeps the largest population; a pair without any is `None`.
pub fn build_heatmap(dataset: &PopulationDataset) -> HeatmapGrid {
    let mut values: BTreeMap<(i32, &str), u64> = BTreeMap::new();
    let mut states: BTreeSet<&str> = BTreeSet::new();
    for r in dataset.records() {
        states.insert(r.state.as_str());
        values
            .entry((r.year, r.state.as_str()))
            .and_modify(|v| *v = (*v).max(r.population))
            .or_insert(r.population);
    }

    let years = dataset.years();
    let cells = years
        .iter()
        .map(|&year| {
            states
                .iter()
                .map(|&state| values.get(&(year, state)).copied())
                .collect()
        })
        .collect();

    HeatmapGrid {
        years,
        states: states.into_iter().map(str::to_owned).collect(),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::record;

    #[test]
    fn test_grid_shape_and_gaps() {
        let ds = PopulationDataset::from_records(vec![
            record("Texas", "48", 2019, 29),
            record("Alaska", "02", 2019, 7),
            record("Texas", "48", 2018, 28),
        ])
        .unwrap();

        let grid = build_heatmap(&ds);
        assert_eq!(grid.years, vec![2018, 2019]);
        assert_eq!(grid.states, vec!["Alaska".to_owned(), "Texas".to_owned()]);
        assert_eq!(grid.cells, vec![vec![None, Some(28)], vec![Some(7), Some(29)]]);
        assert_eq!(grid.get(2019, "Texas"), Some(29));
        assert_eq!(grid.get(2018, "Alaska"), None);
        assert_eq!(grid.get(2000, "Texas"), None);
        assert_eq!(grid.value_range(), Some((7, 29)));
    }

    #[test]
    fn test_same_state_name_keeps_max() {
        // Two ids sharing a display name collapse into one column
        let ds = PopulationDataset::from_records(vec![
            record("Georgia", "13", 2019, 10),
            record("Georgia", "99", 2019, 15),
        ])
        .unwrap();
        assert_eq!(build_heatmap(&ds).get(2019, "Georgia"), Some(15));
    }

    #[test]
    fn test_empty_dataset() {
        let grid = build_heatmap(&PopulationDataset::default());
        assert!(grid.years.is_empty());
        assert_eq!(grid.value_range(), None);
    }
}

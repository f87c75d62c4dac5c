//! In-memory population dataset.
//!
//! A [`PopulationDataset`] is built once by the [`loader`] and never mutated
//! afterwards. Every view the dashboard needs (a [`YearSlice`], the
//! difference table, the heatmap grid) is derived from a shared borrow of it.

pub mod loader;

use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

pub use loader::{dataset_from_frame, load_csv, load_csv_reader, open};

/// One state's population in one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub state: String,
    pub state_id: String,
    pub state_code: String,
    pub year: i32,
    pub population: u64,
}

/// Ordered, read-only collection of [`PopulationRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulationDataset {
    records: Vec<PopulationRecord>,
}

impl PopulationDataset {
    /// Builds a dataset, keeping the input order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::DuplicateRecord`] if two records share the same
    /// state id and year.
    pub fn from_records(records: Vec<PopulationRecord>) -> Result<Self, LoadError> {
        let mut seen: HashSet<(&str, i32)> = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert((record.state_id.as_str(), record.year)) {
                return Err(LoadError::DuplicateRecord {
                    state_id: record.state_id.clone(),
                    year: record.year,
                });
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[PopulationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn min_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).min()
    }

    pub fn max_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).max()
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.records.iter().any(|r| r.year == year)
    }

    /// Whether `year` is the earliest year, i.e. has no prior year to diff against.
    pub fn is_first_year(&self, year: i32) -> bool {
        self.min_year() == Some(year)
    }

    /// Distinct state names in alphabetical order.
    pub fn states(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.state.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Records for a single year, in dataset order.
    pub fn year_slice(&self, year: i32) -> YearSlice<'_> {
        YearSlice {
            year,
            records: self.records.iter().filter(|r| r.year == year).collect(),
        }
    }
}

/// The records of one year. Borrowed from the dataset, recomputed on demand.
#[derive(Debug, Clone)]
pub struct YearSlice<'a> {
    year: i32,
    records: Vec<&'a PopulationRecord>,
}

impl<'a> YearSlice<'a> {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a PopulationRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn distinct_state_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.state.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn max_population(&self) -> u64 {
        self.records.iter().map(|r| r.population).max().unwrap_or(0)
    }

    /// Records ordered by population, largest first. Ties fall back to state name.
    pub fn sorted_by_population(&self) -> Vec<&'a PopulationRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| {
            b.population
                .cmp(&a.population)
                .then_with(|| a.state.cmp(&b.state))
        });
        sorted
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(state: &str, id: &str, year: i32, population: u64) -> PopulationRecord {
        PopulationRecord {
            state: state.to_owned(),
            state_id: id.to_owned(),
            state_code: state.chars().take(2).collect::<String>().to_uppercase(),
            year,
            population,
        }
    }

    fn sample() -> PopulationDataset {
        PopulationDataset::from_records(vec![
            record("Texas", "48", 2019, 28_995_881),
            record("Alaska", "02", 2018, 737_438),
            record("Texas", "48", 2018, 28_701_845),
            record("Alaska", "02", 2019, 731_545),
            record("Ohio", "39", 2019, 11_689_100),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_state_year_rejected() {
        let result = PopulationDataset::from_records(vec![
            record("Texas", "48", 2019, 1),
            record("Texas", "48", 2019, 2),
        ]);
        assert!(matches!(
            result,
            Err(LoadError::DuplicateRecord { year: 2019, .. })
        ));
    }

    #[test]
    fn test_years_are_distinct_and_sorted() {
        let ds = sample();
        assert_eq!(ds.years(), vec![2018, 2019]);
        assert_eq!(ds.min_year(), Some(2018));
        assert_eq!(ds.max_year(), Some(2019));
        assert!(ds.is_first_year(2018));
        assert!(!ds.is_first_year(2019));
    }

    #[test]
    fn test_empty_dataset_has_no_years() {
        let ds = PopulationDataset::default();
        assert!(ds.years().is_empty());
        assert_eq!(ds.min_year(), None);
        assert!(!ds.is_first_year(2019));
    }

    #[test]
    fn test_year_slice_filters_and_sorts() {
        let ds = sample();
        let slice = ds.year_slice(2019);
        assert_eq!(slice.len(), 3);
        assert_eq!(slice.distinct_state_count(), 3);
        assert_eq!(slice.max_population(), 28_995_881);

        let names: Vec<&str> = slice
            .sorted_by_population()
            .iter()
            .map(|r| r.state.as_str())
            .collect();
        assert_eq!(names, vec!["Texas", "Ohio", "Alaska"]);
    }

    #[test]
    fn test_missing_year_slice_is_empty() {
        let ds = sample();
        let slice = ds.year_slice(2005);
        assert!(slice.is_empty());
        assert_eq!(slice.max_population(), 0);
        assert!(slice.sorted_by_population().is_empty());
    }

    #[test]
    fn test_states_alphabetical() {
        assert_eq!(sample().states(), vec!["Alaska", "Ohio", "Texas"]);
    }
}

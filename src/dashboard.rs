//! Dashboard state and the derivation pipeline.
//!
//! [`DashboardFilters`] is the only mutable state: the selected year and
//! color theme. Everything shown on screen is a [`DashboardView`] produced by
//! [`derive_view`] from the read-only dataset and the current filters. A host
//! UI calls `derive_view` again after every filter change and drops the old
//! view.

use crate::analyser::differences::{DifferenceRecord, compute_differences};
use crate::analyser::heatmap::{HeatmapGrid, build_heatmap};
use crate::analyser::migration::{MigrationSummary, classify_migration};
use crate::dataset::{PopulationDataset, PopulationRecord};
use crate::error::{DashboardError, Result};
use crate::format::{format_number, format_population};
use crate::theme::{ColorTheme, DonutColor, DonutPalette};
use serde::{Deserialize, Serialize};

/// Shown in place of a state name or value when there is nothing to compare.
pub const PLACEHOLDER: &str = "-";

/// User-selected filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFilters {
    pub selected_year: i32,
    pub selected_theme: ColorTheme,
}

impl DashboardFilters {
    /// Defaults to the most recent year. `None` for an empty dataset.
    pub fn for_dataset(dataset: &PopulationDataset, theme: ColorTheme) -> Option<Self> {
        dataset.max_year().map(|year| Self {
            selected_year: year,
            selected_theme: theme,
        })
    }

    /// # Errors
    ///
    /// Returns [`DashboardError::UnknownYear`] if the dataset has no rows for `year`.
    pub fn select_year(&mut self, dataset: &PopulationDataset, year: i32) -> Result<()> {
        if !dataset.contains_year(year) {
            return Err(DashboardError::UnknownYear(year));
        }
        self.selected_year = year;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`DashboardError::UnknownTheme`] for names outside the theme list.
    pub fn select_theme(&mut self, name: &str) -> Result<()> {
        self.selected_theme = name.parse()?;
        Ok(())
    }
}

/// A labelled metric tile: state name, formatted population, formatted delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateMetric {
    pub label: String,
    pub value: String,
    pub delta: String,
}

impl StateMetric {
    pub fn placeholder() -> Self {
        Self {
            label: PLACEHOLDER.to_owned(),
            value: PLACEHOLDER.to_owned(),
            delta: String::new(),
        }
    }

    fn from_difference(record: &DifferenceRecord) -> Self {
        Self {
            label: record.state.clone(),
            value: format_population(record.population),
            delta: format_number(record.population_delta),
        }
    }
}

/// Ring chart showing one percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonutChart {
    pub label: &'static str,
    pub percent: u8,
    pub color: DonutColor,
    pub palette: DonutPalette,
    /// Arc sizes: the unfilled remainder, then the filled share.
    pub segments: [u8; 2],
}

impl DonutChart {
    pub fn new(label: &'static str, percent: u8, color: DonutColor) -> Self {
        let percent = percent.min(100);
        Self {
            label,
            percent,
            color,
            palette: color.palette(),
            segments: [100 - percent, percent],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoroplethCell {
    pub state_code: String,
    pub state: String,
    pub population: u64,
}

/// Choropleth locations keyed by postal code, plus the color scale domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choropleth {
    pub cells: Vec<ChoroplethCell>,
    pub color_range: (u64, u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub state: String,
    pub population: u64,
}

/// Ranked "top states" table. `max_population` bounds the progress column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedTable {
    pub rows: Vec<TableRow>,
    pub max_population: u64,
}

/// Everything a renderer needs for one filter selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub year: i32,
    pub theme: ColorTheme,
    /// Records of the selected year, largest population first.
    pub year_slice: Vec<PopulationRecord>,
    /// `None` when the selected year is the first year of the dataset.
    pub differences: Option<Vec<DifferenceRecord>>,
    pub migration: MigrationSummary,
    pub gains: StateMetric,
    pub losses: StateMetric,
    pub inbound_donut: DonutChart,
    pub outbound_donut: DonutChart,
    pub choropleth: Choropleth,
    pub table: RankedTable,
    pub heatmap: HeatmapGrid,
    /// Smallest and largest heatmap cell, `None` for an empty dataset.
    pub heatmap_color_range: Option<(u64, u64)>,
}

/// Derives the full view for `filters`.
///
/// For the earliest year the difference engine is skipped entirely: metric
/// tiles show placeholders and both donuts show 0%. A year with no rows
/// produces empty tables and placeholders rather than an error.
pub fn derive_view(dataset: &PopulationDataset, filters: &DashboardFilters) -> DashboardView {
    let year = filters.selected_year;
    let slice = dataset.year_slice(year);
    let ranked: Vec<PopulationRecord> = slice
        .sorted_by_population()
        .into_iter()
        .cloned()
        .collect();

    let differences = if dataset.is_first_year(year) {
        tracing::debug!(year, "First year in dataset, skipping differences");
        None
    } else {
        Some(compute_differences(dataset, year))
    };

    let extremes = differences
        .as_deref()
        .and_then(|diffs| Some((diffs, diffs.first()?, diffs.last()?)));
    let (migration, gains, losses) = match extremes {
        Some((diffs, first, last)) => (
            classify_migration(diffs),
            StateMetric::from_difference(first),
            StateMetric::from_difference(last),
        ),
        None => (
            MigrationSummary::default(),
            StateMetric::placeholder(),
            StateMetric::placeholder(),
        ),
    };

    let max_population = slice.max_population();
    let choropleth = Choropleth {
        cells: ranked
            .iter()
            .map(|r| ChoroplethCell {
                state_code: r.state_code.clone(),
                state: r.state.clone(),
                population: r.population,
            })
            .collect(),
        color_range: (0, max_population),
    };
    let table = RankedTable {
        rows: ranked
            .iter()
            .map(|r| TableRow {
                state: r.state.clone(),
                population: r.population,
            })
            .collect(),
        max_population,
    };

    let heatmap = build_heatmap(dataset);
    let heatmap_color_range = heatmap.value_range();

    tracing::debug!(
        year,
        theme = %filters.selected_theme,
        states = ranked.len(),
        inbound = migration.inbound_percent,
        outbound = migration.outbound_percent,
        "Derived dashboard view"
    );

    DashboardView {
        year,
        theme: filters.selected_theme,
        year_slice: ranked,
        differences,
        migration,
        gains,
        losses,
        inbound_donut: DonutChart::new(
            "Inbound Migration",
            migration.inbound_percent,
            DonutColor::Green,
        ),
        outbound_donut: DonutChart::new(
            "Outbound Migration",
            migration.outbound_percent,
            DonutColor::Red,
        ),
        choropleth,
        table,
        heatmap,
        heatmap_color_range,
    }
}

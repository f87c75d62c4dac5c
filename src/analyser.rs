//! Pure transforms over a [`crate::dataset::PopulationDataset`].
//!
//! - [`differences`]: year-over-year change per state, joined by state id
//! - [`migration`]: share of states gaining or losing more than 50,000 people
//! - [`heatmap`]: year x state grid over the whole dataset

pub mod differences;
pub mod heatmap;
pub mod migration;

pub use differences::{DifferenceRecord, compute_differences};
pub use heatmap::{HeatmapGrid, build_heatmap};
pub use migration::{MIGRATION_THRESHOLD, MigrationSummary, classify_migration};

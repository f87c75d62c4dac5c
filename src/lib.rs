//! # popdash - US state population dashboard core
//!
//! popdash turns a table of yearly state populations into everything a
//! dashboard shows: the ranked table and choropleth for one year, the
//! year-over-year change per state, the share of states with large inbound
//! or outbound migration, and the year x state heatmap.
//!
//! ## Quick Start
//!
//! ```no_run
//! use popdash::dashboard::{DashboardFilters, derive_view};
//! use popdash::theme::ColorTheme;
//!
//! use popdash::error::DashboardError;
//!
//! # fn example() -> popdash::error::Result<()> {
//! let dataset = popdash::dataset::open("data/us-population-2010-2019-reshaped.csv".as_ref())?;
//! let mut filters = DashboardFilters::for_dataset(&dataset, ColorTheme::Blues)
//!     .ok_or_else(|| DashboardError::Other("empty dataset".to_owned()))?;
//! filters.select_year(&dataset, 2019)?;
//!
//! let view = derive_view(&dataset, &filters);
//! println!("{} gained {}", view.gains.label, view.gains.delta);
//! println!("{} % of states above +50k", view.migration.inbound_percent);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`dataset`]: the read-only dataset and its CSV loader
//! - [`analyser`]: year-over-year differences, migration shares, heatmap grid
//! - [`format`]: abbreviated population labels (`"2.5 M"`, `"45 K"`)
//! - [`dashboard`]: filter state and the `dataset x filters -> view` pipeline
//! - [`report`]: plain-text rendering of a view
//! - [`theme`]: color themes and donut palettes
//! - [`config`], [`logging`], [`error`]: settings, tracing setup, error types
//!
//! ## Lifecycle
//!
//! The dataset is loaded once and never mutated. Filters are the only state;
//! every view is recomputed from scratch when they change, which is cheap for
//! a few hundred rows.

#![warn(clippy::all, rust_2018_idioms)]

pub mod analyser;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod format;
pub mod logging;
pub mod report;
pub mod theme;

//! CSV loading via polars.
//!
//! Every column is read as a string first so that identifier columns keep
//! their leading zeros (FIPS `01` for Alabama) and so that a single bad
//! population cell never poisons the schema inference of the whole column.
//! Typing happens per cell afterwards.

use super::{PopulationDataset, PopulationRecord};
use crate::error::LoadError;
use polars::prelude::*;
use std::io::{Cursor, Read as _};
use std::path::Path;

const STATE_COLUMNS: &[&str] = &["state", "states"];
const STATE_CODE_COLUMNS: &[&str] = &["states_code", "state_code", "stateCode"];
const STATE_ID_COLUMNS: &[&str] = &["id", "state_id", "stateId"];
const YEAR_COLUMNS: &[&str] = &["year"];
const POPULATION_COLUMNS: &[&str] = &["population"];

/// Loads a population CSV from disk.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read, is not valid CSV, lacks
/// a required column, or has an unreadable state/code/id/year cell.
pub fn load_csv(path: &Path) -> Result<PopulationDataset, LoadError> {
    tracing::debug!("Scanning population CSV at {}", path.display());
    // Missing files are I/O errors, not polars errors
    std::fs::metadata(path)?;
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()?
        .collect()?;
    let dataset = dataset_from_frame(&df)?;
    tracing::info!(
        records = dataset.len(),
        years = dataset.years().len(),
        "Loaded population dataset from {}",
        path.display()
    );
    Ok(dataset)
}

/// Opens the dataset the dashboard runs on.
///
/// Same as [`load_csv`], lifted into the crate-wide [`crate::error::Result`].
///
/// # Errors
///
/// Returns [`crate::error::DashboardError::Load`] wrapping the underlying [`LoadError`].
pub fn open(path: &Path) -> crate::error::Result<PopulationDataset> {
    let dataset = load_csv(path)?;
    if dataset.is_empty() {
        tracing::warn!("{} contains no rows", path.display());
    }
    Ok(dataset)
}

/// Loads a population CSV from an in-memory reader.
///
/// # Errors
///
/// Same conditions as [`load_csv`].
pub fn load_csv_reader<R: std::io::Read>(mut reader: R) -> Result<PopulationDataset, LoadError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    load_csv_bytes(bytes)
}

fn load_csv_bytes(bytes: Vec<u8>) -> Result<PopulationDataset, LoadError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;
    dataset_from_frame(&df)
}

/// Converts an already loaded frame into a dataset.
///
/// Column types do not matter; every cell is read through its string form.
///
/// # Errors
///
/// Returns [`LoadError`] for missing columns, empty or malformed
/// state/code/id/year cells, and duplicate (state id, year) pairs.
pub fn dataset_from_frame(df: &DataFrame) -> Result<PopulationDataset, LoadError> {
    let states = string_cells(df, STATE_COLUMNS)?;
    let codes = string_cells(df, STATE_CODE_COLUMNS)?;
    let ids = string_cells(df, STATE_ID_COLUMNS)?;
    let years = string_cells(df, YEAR_COLUMNS)?;
    let populations = string_cells(df, POPULATION_COLUMNS)?;

    let mut records = Vec::with_capacity(df.height());
    let mut coerced = 0_usize;

    let rows = states
        .into_iter()
        .zip(codes)
        .zip(ids)
        .zip(years)
        .zip(populations)
        .enumerate();

    for (idx, ((((state, code), id), year), population)) in rows {
        let row = idx + 1;
        let parsed = parse_population(population.as_deref());
        if parsed.is_none() {
            coerced += 1;
        }

        records.push(PopulationRecord {
            state: required(state, row, "state")?,
            state_code: required(code, row, "states_code")?,
            state_id: required(id, row, "id")?,
            year: parse_year(year, row)?,
            population: parsed.unwrap_or(0),
        });
    }

    if coerced > 0 {
        tracing::debug!(coerced, "Population cells that could not be parsed were set to 0");
    }

    PopulationDataset::from_records(records)
}

/// Empty, non-numeric, non-finite and negative cells yield `None`; fractional
/// values are truncated.
fn parse_population(cell: Option<&str>) -> Option<u64> {
    let value: f64 = cell?.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then(|| value.trunc() as u64)
}

fn parse_year(cell: Option<String>, row: usize) -> Result<i32, LoadError> {
    let raw = required(cell, row, "year")?;
    if let Ok(year) = raw.parse::<i32>() {
        return Ok(year);
    }
    // Float-typed year columns stringify as "2019.0"
    match raw.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) => {
            Ok(v as i32)
        }
        _ => Err(LoadError::InvalidValue {
            row,
            column: "year",
            value: raw,
        }),
    }
}

fn required(cell: Option<String>, row: usize, column: &'static str) -> Result<String, LoadError> {
    match cell {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_owned()),
        other => Err(LoadError::InvalidValue {
            row,
            column,
            value: other.unwrap_or_default(),
        }),
    }
}

fn resolve_column(df: &DataFrame, candidates: &[&'static str]) -> Result<&'static str, LoadError> {
    let present = df.get_column_names();
    candidates
        .iter()
        .copied()
        .find(|c| present.iter().any(|name| name.as_str() == *c))
        .ok_or_else(|| LoadError::MissingColumn(candidates.join(" | ")))
}

fn string_cells(
    df: &DataFrame,
    candidates: &[&'static str],
) -> Result<Vec<Option<String>>, LoadError> {
    let name = resolve_column(df, candidates)?;
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let cells = series
        .str()?
        .into_iter()
        .map(|v| v.map(std::borrow::ToOwned::to_owned))
        .collect();
    Ok(cells)
}

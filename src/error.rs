//! Error types for popdash.
//!
//! Two layers of errors exist:
//!
//! - [`LoadError`]: the dataset could not be loaded. This is always fatal;
//!   no partially loaded dataset is ever handed out.
//! - [`DashboardError`]: anything else the library can report, including a
//!   wrapped [`LoadError`] and invalid filter selections.
//!
//! Recoverable data-quality conditions (an unparseable population cell, a
//! state missing from the prior year, an empty year) are not errors at all;
//! they resolve to defaults inside the transforms.
//!
//! ## Context Extension Trait
//!
//! ```no_run
//! use popdash::error::ResultExt as _;
//!
//! fn read_source(path: &str) -> popdash::error::Result<String> {
//!     std::fs::read_to_string(path).context("Failed to read population CSV")
//! }
//! ```

use std::fmt;

/// Fatal failure while building a [`crate::dataset::PopulationDataset`].
#[derive(Debug)]
pub enum LoadError {
    /// The source could not be opened or read
    Io(std::io::Error),

    /// The CSV structure could not be parsed
    Parse(String),

    /// A required column is absent (lists the accepted header names)
    MissingColumn(String),

    /// A structural cell (state, code, id, year) is empty or malformed
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// Two rows describe the same state in the same year
    DuplicateRecord { state_id: String, year: i32 },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(msg) => write!(f, "Malformed CSV: {msg}"),
            Self::MissingColumn(name) => write!(f, "Missing required column: {name}"),
            Self::InvalidValue { row, column, value } => {
                write!(f, "Invalid value {value:?} in column '{column}' at row {row}")
            }
            Self::DuplicateRecord { state_id, year } => {
                write!(f, "Duplicate record for state id {state_id} in {year}")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<polars::error::PolarsError> for LoadError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Main error type for popdash operations.
#[derive(Debug)]
pub enum DashboardError {
    /// Dataset loading failed
    Load(LoadError),

    /// I/O errors outside of dataset loading (config, output)
    Io(std::io::Error),

    /// The requested year is not present in the dataset
    UnknownYear(i32),

    /// The requested color theme is not one of the supported names
    UnknownTheme(String),

    /// Configuration errors
    Config(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "Failed to load dataset: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnknownYear(year) => write!(f, "Year {year} is not in the dataset"),
            Self::UnknownTheme(name) => write!(f, "Unknown color theme: {name}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LoadError> for DashboardError {
    fn from(err: LoadError) -> Self {
        Self::Load(err)
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

/// Result type alias for popdash operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<DashboardError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: DashboardError = e.into();
            DashboardError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: DashboardError = e.into();
            DashboardError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_display() {
        let err = LoadError::MissingColumn("population".to_owned());
        assert_eq!(err.to_string(), "Missing required column: population");
    }

    #[test]
    fn test_invalid_value_display() {
        let err = LoadError::InvalidValue {
            row: 3,
            column: "year",
            value: "20x9".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value \"20x9\" in column 'year' at row 3"
        );
    }

    #[test]
    fn test_load_error_wraps_into_dashboard_error() {
        let err: DashboardError = LoadError::Parse("bad quote".to_owned()).into();
        assert_eq!(
            err.to_string(),
            "Failed to load dataset: Malformed CSV: bad quote"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_json_error_is_config_error() {
        let err: DashboardError = serde_json::from_str::<u32>("{").unwrap_err().into();
        assert!(matches!(err, DashboardError::Config(ref msg) if msg.starts_with("JSON error")));
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "data.csv",
        ));

        let result: Result<()> = result.context("Failed to read file");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .starts_with("Failed to read file: I/O error")
        );
    }
}

//! Common error types for the news dashboard

use std::path::PathBuf;
use thiserror::Error;

use crate::facets::Facet;

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, Error>;

/// Errors outside dataset loading and filter validation
#[derive(Error, Debug)]
pub enum Error {
    /// Config file exists but could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Fatal dataset load failures
///
/// Any of these stops startup; per-row problems never surface here.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset contains no article rows")]
    Empty,

    #[error("Dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Rejected filter specifications
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A facet selection was given with no members
    ///
    /// "Select all" is `Selection::AllSelected`; an empty set would silently
    /// match nothing, so it is refused instead.
    #[error("Empty selection for {0} facet")]
    EmptySelection(Facet),

    #[error("Invalid range: min {min} is greater than max {max}")]
    InvertedRange { min: f64, max: f64 },

    #[error("Invalid range: bounds must be finite numbers")]
    NonFiniteBound,

    #[error("Unknown entity category: {0}")]
    UnknownCategory(String),
}

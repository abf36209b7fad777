//! Error handling for the analysis pipelines.

use crate::render::charts::ChartError;
use arrow::error::ArrowError;
use std::{fmt, io};

/// Specialized error type for the analysis pipelines
#[derive(Debug)]
pub enum AnalysisError {
    /// Error opening or reading a file
    IoError(io::Error),
    /// Error parsing delimited data into Arrow batches
    ArrowError(ArrowError),
    /// Error resolving a required column against a table header
    SchemaError(String),
    /// Error with data shape or content
    DataError(String),
    /// Error rendering a chart
    ChartError(ChartError),
    /// Error in run configuration
    ConfigError(String),
}

impl From<io::Error> for AnalysisError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error)
    }
}

impl From<ArrowError> for AnalysisError {
    fn from(error: ArrowError) -> Self {
        Self::ArrowError(error)
    }
}

impl From<ChartError> for AnalysisError {
    fn from(error: ChartError) -> Self {
        Self::ChartError(error)
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::ArrowError(e) => write!(f, "Arrow error: {e}"),
            Self::SchemaError(msg) => write!(f, "Schema error: {msg}"),
            Self::DataError(msg) => write!(f, "Data error: {msg}"),
            Self::ChartError(e) => write!(f, "Chart error: {e}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for AnalysisError {}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

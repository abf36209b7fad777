//! A Rust library for occupation-level AI-exposure statistics: quantile
//! binning, weighted means, and skill correlations over BLS and survey
//! tables, plus the charts and tables derived from them.

pub mod algorithm;
pub mod analysis;
pub mod config;
pub mod error;
pub mod models;
pub mod reader;
pub mod registry;
pub mod render;
pub mod schema;
pub mod soc;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use analysis::Analysis;
pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};

// Arrow types
pub use arrow::record_batch::RecordBatch;

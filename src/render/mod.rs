//! Rendering of analysis artifacts
//!
//! Charts are PNG files drawn with the [`plotters`] bitmap backend; tables
//! are CSV files written through the Arrow writer.

pub mod charts;
pub mod tables;

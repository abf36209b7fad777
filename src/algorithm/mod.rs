//! Statistics primitives for the exposure analyses
//!
//! This module contains the weighted-statistics, binning, join, and
//! correlation building blocks shared by the analysis pipelines. Everything
//! here is a pure function of its input; rendering and I/O live elsewhere.

pub mod binning;
pub mod correlation;
pub mod join;
pub mod stats;

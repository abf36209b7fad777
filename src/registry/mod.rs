//! Loaders for the source tables used by the analyses
//!
//! Each submodule knows one published table format: which file it usually
//! lives in, which columns matter, and how to turn the raw rows into the
//! domain models in [`crate::models`]. All loaders share the CSV reading
//! pipeline in [`crate::reader`] and the column rules in [`crate::schema`].
//!
//! Available sources:
//! - exposure: AIOE scores per occupation (Felten et al. appendix)
//! - oews: BLS Occupational Employment and Wage Statistics snapshots
//! - skills: O*NET-style skill importance matrix
//! - education: entry-level education attainment shares
//! - postings: AI-related job postings share time series

pub mod education;
pub mod exposure;
pub mod oews;
pub mod postings;
pub mod skills;

//! Domain models for the exposure analyses
//!
//! This module contains the typed records the registries produce and the
//! result shapes the statistics layer hands to the renderer. Missing values
//! are explicit: a cell that failed coercion or an aggregate with no defined
//! value is `None`, never a silent NaN.

/// One occupation with its AI exposure score
#[derive(Debug, Clone)]
pub struct ExposureRecord {
    /// Normalized occupation code
    pub soc: String,
    /// AI Occupational Exposure score
    pub aioe: f64,
}

/// One detailed occupation row from a national OEWS snapshot
#[derive(Debug, Clone)]
pub struct EmploymentRecord {
    /// Normalized occupation code
    pub soc: String,
    /// Total employment, when reported
    pub employment: Option<f64>,
    /// Annual wage, possibly derived from an hourly rate
    pub annual_wage: Option<f64>,
}

/// One occupation row of the skills matrix
#[derive(Debug, Clone)]
pub struct SkillRow {
    /// Normalized occupation code
    pub soc: String,
    /// Scores aligned with the matrix categories, missing where the cell
    /// did not coerce
    pub scores: Vec<Option<f64>>,
}

/// The skills table: category names plus one row per occupation
#[derive(Debug, Clone)]
pub struct SkillMatrix {
    /// Retained skill category names, in source column order
    pub categories: Vec<String>,
    /// Occupation rows
    pub rows: Vec<SkillRow>,
}

/// Educational attainment for one occupation
#[derive(Debug, Clone)]
pub struct EducationRecord {
    /// Normalized occupation code
    pub soc: String,
    /// Share holding a bachelor's degree or higher, in percent. Degree
    /// columns that failed coercion contribute nothing to the sum.
    pub advanced_share: f64,
}

/// One country-year observation from the job postings panel
#[derive(Debug, Clone)]
pub struct PostingsPoint {
    /// Country or region name
    pub entity: String,
    /// ISO-style country code
    pub code: String,
    /// Observation year
    pub year: i32,
    /// Share of postings mentioning AI
    pub share: f64,
}

/// Correlation of one skill category with the exposure score
#[derive(Debug, Clone)]
pub struct CorrelationRow {
    /// Skill category name
    pub category: String,
    /// Pearson coefficient; undefined with fewer than two complete pairs
    /// or zero variance
    pub coefficient: Option<f64>,
}

/// Aggregate for one quantile bin
#[derive(Debug, Clone)]
pub struct BinSummary {
    /// Bin label, 1 = lowest exposure
    pub bin: usize,
    /// Members assigned to the bin
    pub count: usize,
    /// Weighted mean of the target value; undefined for an empty bin or
    /// non-positive total weight
    pub value: Option<f64>,
}

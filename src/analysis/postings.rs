//! AI-related postings share over time
//!
//! Filters the country-year postings panel to one country and charts the
//! share as a line over years. The chart title and file name follow the
//! published United States artifact; the configured country code only
//! selects which series is drawn.

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::models::PostingsPoint;
use crate::registry;
use crate::render::charts;
use log::info;
use std::fs;
use std::path::PathBuf;

/// Chart artifact name
pub const CHART_FILE: &str = "ctx_ai_job_postings_share_us.png";

/// Year-ordered share series for one country code
#[must_use]
pub fn compute(points: &[PostingsPoint], country_code: &str) -> Vec<(i32, f64)> {
    let mut series: Vec<(i32, f64)> = points
        .iter()
        .filter(|point| point.code == country_code)
        .map(|point| (point.year, point.share))
        .collect();
    series.sort_by_key(|(year, _)| *year);
    series
}

/// Load the panel, select the configured country, and render the chart
pub fn run(config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let points =
        registry::postings::read(&config.data_dir.join(registry::postings::DEFAULT_FILE))?;

    let series = compute(&points, &config.postings_country);
    if series.is_empty() {
        return Err(AnalysisError::DataError(format!(
            "no postings observations for country code '{}'",
            config.postings_country
        )));
    }
    info!(
        "Postings series for {} spans {} years",
        config.postings_country,
        series.len()
    );

    fs::create_dir_all(&config.output_dir)?;
    let chart_path = config.output_dir.join(CHART_FILE);
    charts::year_line_chart(
        &series,
        "AI-related job postings share in the United States",
        "Year",
        "Share of job postings mentioning AI",
        &chart_path,
    )?;
    Ok(vec![chart_path])
}

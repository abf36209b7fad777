//! Adaptive quantile binning over exposure scores
//!
//! Bin counts adapt to the joined table size so tiny joins still chart:
//! ten bins when the data allows, never fewer than two. Rows are ranked by
//! score with first-occurrence tie-breaking and the ranks are split into
//! near-equal groups, so bin 1 always holds the lowest scores and the last
//! bin the highest.

use crate::algorithm::stats::weighted_mean;
use crate::error::{AnalysisError, Result};
use crate::models::BinSummary;
use itertools::izip;

/// Most bins a chart gets
pub const MAX_BINS: usize = 10;

/// Fewest bins a chart gets
pub const MIN_BINS: usize = 2;

/// Number of bins for a table of `rows` rows
#[must_use]
pub fn adaptive_bin_count(rows: usize) -> usize {
    rows.clamp(MIN_BINS, MAX_BINS)
}

/// Assign each score a bin label in `1..=bins`, lowest scores first
///
/// Ties keep their input order. Returns the labels alongside the bin count;
/// an empty input is an error since no bin count is meaningful for it. A
/// single row lands in bin 1 and the trailing bin stays empty.
pub fn assign_quantile_bins(scores: &[f64]) -> Result<(Vec<usize>, usize)> {
    let n = scores.len();
    if n == 0 {
        return Err(AnalysisError::DataError(
            "cannot bin an empty score set".to_string(),
        ));
    }
    let bins = adaptive_bin_count(n);

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut labels = vec![0; n];
    for (rank, &index) in order.iter().enumerate() {
        labels[index] = rank * bins / n + 1;
    }
    Ok((labels, bins))
}

/// Weighted mean of `values` per bin, for every bin in `1..=bins`
///
/// Bins nobody was assigned to come back with a count of zero and an
/// undefined value.
#[must_use]
pub fn weighted_mean_by_bin(
    labels: &[usize],
    bins: usize,
    values: &[f64],
    weights: &[f64],
) -> Vec<BinSummary> {
    (1..=bins)
        .map(|bin| {
            let (bin_values, bin_weights): (Vec<f64>, Vec<f64>) = izip!(labels, values, weights)
                .filter(|(label, _, _)| **label == bin)
                .map(|(_, value, weight)| (*value, *weight))
                .unzip();
            BinSummary {
                bin,
                count: bin_values.len(),
                value: weighted_mean(&bin_values, &bin_weights),
            }
        })
        .collect()
}

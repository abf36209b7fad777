//! Weighted means, percent change, and percentile grouping.

/// Weighted arithmetic mean
///
/// Undefined for empty input, mismatched lengths, or a non-positive total
/// weight. Callers fill missing weights first, see [`fill_missing_weights`].
#[must_use]
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> Option<f64> {
    if values.is_empty() || values.len() != weights.len() {
        return None;
    }
    let total_weight: f64 = weights.iter().sum();
    if total_weight <= 0.0 {
        return None;
    }
    let weighted_sum: f64 = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    Some(weighted_sum / total_weight)
}

/// Replace missing weights with a unit weight
#[must_use]
pub fn fill_missing_weights(weights: &[Option<f64>]) -> Vec<f64> {
    weights.iter().map(|w| w.unwrap_or(1.0)).collect()
}

/// Percent change from `old_value` to `new_value`
///
/// A zero `old_value` yields a non-finite result; callers that chart the
/// outcome drop non-finite values at the rendering boundary.
#[must_use]
pub fn percent_change(new_value: f64, old_value: f64) -> f64 {
    100.0 * (new_value - old_value) / old_value
}

/// Interpolated percentile of `values` at fraction `q` in `[0, 1]`
///
/// Linear interpolation between the order statistics around position
/// `q * (n - 1)`. Undefined for empty input.
#[must_use]
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Indices of the rows at or below the `low_q` percentile and at or above
/// the `high_q` percentile
///
/// With few rows the two thresholds can coincide, in which case a row may
/// land in both groups.
#[must_use]
pub fn split_by_percentile(scores: &[f64], low_q: f64, high_q: f64) -> (Vec<usize>, Vec<usize>) {
    let (Some(low_cut), Some(high_cut)) = (percentile(scores, low_q), percentile(scores, high_q))
    else {
        return (Vec::new(), Vec::new());
    };
    let low = scores
        .iter()
        .enumerate()
        .filter(|(_, score)| **score <= low_cut)
        .map(|(index, _)| index)
        .collect();
    let high = scores
        .iter()
        .enumerate()
        .filter(|(_, score)| **score >= high_cut)
        .map(|(index, _)| index)
        .collect();
    (low, high)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_mean_uniform_weights() {
        assert_eq!(weighted_mean(&[10.0, 20.0], &[1.0, 1.0]), Some(15.0));
    }

    #[test]
    fn test_weighted_mean_skewed_weights() {
        assert_eq!(weighted_mean(&[10.0, 20.0], &[1.0, 3.0]), Some(17.5));
    }

    #[test]
    fn test_weighted_mean_undefined_cases() {
        assert_eq!(weighted_mean(&[], &[]), None);
        assert_eq!(weighted_mean(&[1.0], &[1.0, 2.0]), None);
        assert_eq!(weighted_mean(&[1.0, 2.0], &[0.0, 0.0]), None);
        assert_eq!(weighted_mean(&[1.0, 2.0], &[2.0, -2.0]), None);
    }

    #[test]
    fn test_fill_missing_weights() {
        assert_eq!(
            fill_missing_weights(&[Some(3.0), None, Some(0.5)]),
            vec![3.0, 1.0, 0.5]
        );
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(150.0, 100.0), 50.0);
        assert_eq!(percent_change(0.0, 100.0), -100.0);
        assert_eq!(percent_change(110.0, 100.0), 10.0);
        assert_eq!(percent_change(90.0, 100.0), -10.0);
        assert!(!percent_change(5.0, 0.0).is_finite());
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&values, 0.0), Some(1.0));
        assert_eq!(percentile(&values, 0.5), Some(3.0));
        assert_eq!(percentile(&values, 1.0), Some(5.0));
        // position 0.2 * 4 = 0.8 between 1.0 and 2.0
        assert!((percentile(&values, 0.2).unwrap() - 1.8).abs() < 1e-12);
        assert_eq!(percentile(&[], 0.5), None);
    }

    #[test]
    fn test_percentile_ignores_input_order() {
        let values = [5.0, 1.0, 4.0, 2.0, 3.0];
        assert_eq!(percentile(&values, 0.5), Some(3.0));
    }

    #[test]
    fn test_split_by_percentile() {
        let scores = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];
        let (low, high) = split_by_percentile(&scores, 0.2, 0.8);
        assert_eq!(low, vec![0, 1]);
        assert_eq!(high, vec![8, 9]);
    }

    #[test]
    fn test_split_by_percentile_coinciding_thresholds() {
        // Identical scores put every row in both groups.
        let scores = [5.0, 5.0];
        let (low, high) = split_by_percentile(&scores, 0.2, 0.8);
        assert_eq!(low, vec![0, 1]);
        assert_eq!(high, vec![0, 1]);
    }
}

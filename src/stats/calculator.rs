//! Statistics Calculator Module
//! Single-pass descriptive statistics: mean, median, per-group means.

use crate::data::{Dataset, LoaderError, COL_LAND_RATE, COL_MARKET_VALUE};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error(transparent)]
    Data(#[from] LoaderError),
}

/// The four derived scalars shown in the summary panels.
///
/// `count` counts every row of the dataset. The mean and median figures are
/// computed over non-null values only; rows where the column is null or not
/// parseable as a number are skipped, and an all-null column yields NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub avg_market_value: f64,
    pub median_market_value: f64,
    pub avg_land_rate: f64,
}

impl Summary {
    /// Compute the summary once from the loaded dataset.
    pub fn compute(dataset: &Dataset) -> Result<Self, StatsError> {
        let market_values: Vec<f64> = dataset
            .numeric_column(COL_MARKET_VALUE)?
            .into_iter()
            .flatten()
            .collect();
        let land_rates: Vec<f64> = dataset
            .numeric_column(COL_LAND_RATE)?
            .into_iter()
            .flatten()
            .collect();

        Ok(Self {
            count: dataset.height(),
            avg_market_value: mean(&market_values),
            median_market_value: median(&market_values),
            avg_land_rate: mean(&land_rates),
        })
    }
}

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median with the standard midpoint rule: the average of the two middle
/// values for even counts. NaN for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Mean of `value_col` for each distinct value of `group_col`, keys in
/// ascending order. Rows where either column is null are skipped. Groups are
/// evaluated in parallel; the output order is the key order regardless.
pub fn group_means(
    dataset: &Dataset,
    group_col: &str,
    value_col: &str,
) -> Result<Vec<(String, f64)>, StatsError> {
    let keys = dataset.category_column(group_col)?;
    let values = dataset.numeric_column(value_col)?;

    let mut groups: Vec<String> = keys.iter().flatten().cloned().collect();
    groups.sort();
    groups.dedup();

    let means = groups
        .into_par_iter()
        .map(|group| {
            let group_values: Vec<f64> = keys
                .iter()
                .zip(&values)
                .filter_map(|(key, value)| match (key, value) {
                    (Some(k), Some(v)) if *k == group => Some(*v),
                    _ => None,
                })
                .collect();
            let group_mean = mean(&group_values);
            (group, group_mean)
        })
        .collect();

    Ok(means)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_nan() {
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn mean_basic() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn median_odd_count_takes_middle() {
        assert_eq!(median(&[9.0, 1.0, 5.0]), 5.0);
    }

    #[test]
    fn median_even_count_averages_middle_pair() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn median_of_empty_is_nan() {
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn median_does_not_reorder_input() {
        let values = vec![3.0, 1.0, 2.0];
        let _ = median(&values);
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }
}

//! Descriptive statistics over numeric columns.

use crate::error::StatsError;
use crate::quality::quartile_at;
use crate::table::Table;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub variance: f64,
    pub standard_deviation: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    pub q1: f64,
    pub q3: f64,
}

/// Result of a batch `describe` call: computed columns in request order plus
/// the columns that were left out.
#[derive(Clone, Debug, PartialEq, Default, Serialize)]
pub struct DescribeOutcome {
    pub stats: IndexMap<String, DescriptiveStats>,
    pub skipped: Vec<StatsError>,
}

impl DescriptiveStats {
    /// Computes statistics over finite values. `None` when `values` is empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let median = median_of_sorted(&sorted);
        let min = sorted[0];
        let max = sorted[sorted.len() - 1];

        // constant input has no spread even when the summed mean is inexact
        let (mean, variance, standard_deviation, skewness, kurtosis) = if min == max {
            (min, 0.0, 0.0, 0.0, 0.0)
        } else {
            let mean = values.iter().sum::<f64>() / n;
            let variance = sample_variance(values, mean);
            let standard_deviation = variance.sqrt();
            let (skewness, kurtosis) = shape_moments(values, mean, standard_deviation);
            (mean, variance, standard_deviation, skewness, kurtosis)
        };

        Some(Self {
            count: values.len(),
            mean,
            median,
            mode: mode_of(values),
            min,
            max,
            range: max - min,
            variance,
            standard_deviation,
            skewness,
            kurtosis,
            q1: quartile_at(&sorted, 0.25),
            q3: quartile_at(&sorted, 0.75),
        })
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Sample variance; a single value has variance 0.
fn sample_variance(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let squares: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
    (squares / (values.len() - 1) as f64).max(0.0)
}

/// Population skewness and excess kurtosis standardized by the sample
/// deviation. Both are 0 when the deviation is 0.
fn shape_moments(values: &[f64], mean: f64, std_dev: f64) -> (f64, f64) {
    if std_dev == 0.0 || !std_dev.is_finite() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let (m3, m4) = values.iter().fold((0.0, 0.0), |(m3, m4), x| {
        let z = (x - mean) / std_dev;
        (m3 + z.powi(3), m4 + z.powi(4))
    });
    (m3 / n, m4 / n - 3.0)
}

/// Most frequent value; ties go to the value that occurred first.
fn mode_of(values: &[f64]) -> f64 {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    let mut order: Vec<f64> = Vec::new();
    for &v in values {
        let v = if v == 0.0 { 0.0 } else { v };
        let count = counts.entry(v.to_bits()).or_insert(0);
        if *count == 0 {
            order.push(v);
        }
        *count += 1;
    }

    let mut best = order[0];
    let mut best_count = 0;
    for v in order {
        let count = counts[&v.to_bits()];
        if count > best_count {
            best = v;
            best_count = count;
        }
    }
    best
}

/// Describes each requested column. Columns that are absent or have no
/// finite numeric value are reported in `skipped`; the rest are still computed.
pub fn describe(table: &Table, columns: &[String]) -> DescribeOutcome {
    let mut outcome = DescribeOutcome::default();
    for column in columns {
        if outcome.stats.contains_key(column) {
            continue;
        }
        let stats = table
            .numeric_values(column)
            .and_then(|values| DescriptiveStats::from_values(&values));
        match stats {
            Some(stats) => {
                outcome.stats.insert(column.clone(), stats);
            }
            None => {
                debug!("skipping column {:?}: no numeric values", column);
                outcome.skipped.push(StatsError::InsufficientData {
                    column: column.clone(),
                });
            }
        }
    }
    outcome
}

//! Integration tests for descriptive statistics.

mod common;

use common::{grid, sales_table};
use serde_json::json;
use sheet_insights::error::StatsError;
use sheet_insights::stats::{DescriptiveStats, describe};

fn names(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_known_sample() {
    let stats = DescriptiveStats::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    assert_eq!(stats.count, 8);
    assert_eq!(stats.mean, 5.0);
    assert_eq!(stats.median, 4.5);
    assert_eq!(stats.mode, 4.0);
    assert_eq!(stats.min, 2.0);
    assert_eq!(stats.max, 9.0);
    assert_eq!(stats.range, 7.0);
    assert!((stats.variance - 32.0 / 7.0).abs() < 1e-12);
    assert!((stats.standard_deviation - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    assert_eq!(stats.q1, 4.0);
    assert_eq!(stats.q3, 7.0);
    assert!(stats.skewness > 0.0);
}

#[test]
fn test_constant_column_has_zero_spread() {
    let stats = DescriptiveStats::from_values(&[5.0; 4]).unwrap();
    assert_eq!(stats.variance, 0.0);
    assert_eq!(stats.standard_deviation, 0.0);
    assert_eq!(stats.skewness, 0.0);
    assert_eq!(stats.kurtosis, 0.0);
    assert_eq!(stats.range, 0.0);
}

#[test]
fn test_constant_column_with_inexact_mean() {
    let stats = DescriptiveStats::from_values(&[0.1; 3]).unwrap();
    assert_eq!(stats.mean, 0.1);
    assert_eq!(stats.variance, 0.0);
    assert_eq!(stats.standard_deviation, 0.0);
    assert_eq!(stats.skewness, 0.0);
    assert_eq!(stats.kurtosis, 0.0);
}

#[test]
fn test_single_value() {
    let stats = DescriptiveStats::from_values(&[3.5]).unwrap();
    assert_eq!(stats.variance, 0.0);
    assert_eq!(stats.median, 3.5);
    assert_eq!(stats.q1, 3.5);
    assert_eq!(stats.q3, 3.5);
}

#[test]
fn test_empty_input() {
    assert!(DescriptiveStats::from_values(&[]).is_none());
}

#[test]
fn test_describe_skips_columns_without_numbers() {
    let outcome = describe(&sales_table(), &names(&["sales", "notes", "absent", "units"]));
    let computed: Vec<&String> = outcome.stats.keys().collect();
    assert_eq!(computed, ["sales", "units"]);
    assert_eq!(
        outcome.skipped,
        [
            StatsError::InsufficientData { column: "notes".to_string() },
            StatsError::InsufficientData { column: "absent".to_string() },
        ]
    );
}

#[test]
fn test_describe_ignores_unparsable_cells() {
    let outcome = describe(&sales_table(), &names(&["sales"]));
    let sales = &outcome.stats["sales"];
    assert_eq!(sales.count, 5);
    assert_eq!(sales.max, 1050.0);
}

#[test]
fn test_describe_is_deterministic() {
    let table = grid(
        &["v"],
        [3.1, -2.0, 8.25, 0.5, 3.1].iter().map(|v| vec![json!(v)]).collect(),
    );
    let columns = names(&["v"]);
    assert_eq!(describe(&table, &columns), describe(&table, &columns));
}

#[test]
fn test_skipped_errors_serialize_with_kind() {
    let value = serde_json::to_value(StatsError::InsufficientData {
        column: "notes".to_string(),
    })
    .unwrap();
    assert_eq!(value, json!({"kind": "insufficientData", "column": "notes"}));
}

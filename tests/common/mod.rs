//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use serde_json::{Value, json};
use sheet_insights::chart::ChartData;
use sheet_insights::table::{FULL_ROWS, Table};

/// Grid table from a header list and JSON rows.
pub fn grid(headers: &[&str], rows: Vec<Vec<Value>>) -> Table {
    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    Table::from_grid(&headers, &rows, FULL_ROWS).expect("fixture table")
}

/// Two perfectly correlated columns.
pub fn linear_table() -> Table {
    grid(
        &["x", "y"],
        (1..=5).map(|i| vec![json!(i), json!(2 * i)]).collect(),
    )
}

/// Sales data with a text column, a date column and a few gaps.
pub fn sales_table() -> Table {
    grid(
        &["region", "date", "sales", "units", "notes"],
        vec![
            vec![json!("North"), json!("2024-01-05"), json!(120.5), json!(10), json!("ok")],
            vec![json!("South"), json!("2024-01-06"), json!("1,050"), json!(12), json!(null)],
            vec![json!("East"), json!("2024-01-07"), json!(98), json!(9), json!("late")],
            vec![json!("North"), json!("2024-01-08"), json!(130), json!(null), json!("")],
            vec![json!("West"), json!("2024-01-09"), json!("n/a"), json!(11), json!("ok")],
            vec![json!("South"), json!("2024-01-10"), json!(87.25), json!(8), json!("check")],
        ],
    )
}

pub fn chart_data(labels: &[&str], values: &[f64]) -> ChartData {
    ChartData::new(labels.iter().map(|l| l.to_string()).collect(), values.to_vec())
        .expect("fixture chart data")
}

/// `n` categories with values 1..=n.
pub fn categories(n: usize) -> ChartData {
    ChartData::new(
        (0..n).map(|i| format!("Category {}", i + 1)).collect(),
        (1..=n).map(|v| v as f64).collect(),
    )
    .expect("fixture chart data")
}

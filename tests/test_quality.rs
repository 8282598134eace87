//! Integration tests for the data quality assessor.

mod common;

use common::{grid, sales_table};
use serde_json::json;
use sheet_insights::quality::{InferredType, Severity, assess};

#[test]
fn test_profiles_follow_column_order() {
    let report = assess(&sales_table());
    let names: Vec<&str> = report.per_column.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["region", "date", "sales", "units", "notes"]);
}

#[test]
fn test_type_inference() {
    let report = assess(&sales_table());
    let types: Vec<InferredType> = report.per_column.iter().map(|p| p.inferred_type).collect();
    assert_eq!(
        types,
        [
            InferredType::Text,
            InferredType::Date,
            InferredType::Numeric,
            InferredType::Numeric,
            InferredType::Text,
        ]
    );
    assert_eq!(report.numeric_columns(), ["sales", "units"]);
}

#[test]
fn test_completeness_and_uniqueness() {
    let report = assess(&sales_table());
    let region = report.profile("region").unwrap();
    assert_eq!(region.completeness, 100.0);
    assert_eq!(region.uniqueness, 66.67);

    let notes = report.profile("notes").unwrap();
    assert_eq!(notes.completeness, 66.67);
    assert_eq!(notes.uniqueness, 75.0);
}

#[test]
fn test_outliers_use_iqr_fences() {
    let table = grid(
        &["v"],
        [1, 2, 3, 4, 100].iter().map(|v| vec![json!(v)]).collect(),
    );
    let report = assess(&table);
    let profile = report.profile("v").unwrap();
    assert_eq!(profile.outlier_count, 1);
    assert_eq!(profile.outlier_percentage, 20.0);
    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(report.recommendations[0].severity, Severity::Alert);
}

#[test]
fn test_small_columns_have_no_outliers() {
    let table = grid(&["v"], [1, 2, 1000].iter().map(|v| vec![json!(v)]).collect());
    let profile = assess(&table).profile("v").cloned().unwrap();
    assert_eq!(profile.outlier_count, 0);
    assert_eq!(profile.outlier_percentage, 0.0);
}

#[test]
fn test_recommendations_are_grouped_by_severity() {
    let report = assess(&sales_table());
    let got: Vec<(Severity, &str)> = report
        .recommendations
        .iter()
        .map(|r| (r.severity, r.column.as_str()))
        .collect();
    assert_eq!(
        got,
        [
            (Severity::Warning, "units"),
            (Severity::Warning, "notes"),
            (Severity::Alert, "sales"),
        ]
    );
    assert!(report.recommendations[0].message.contains("16.67%"));
}

#[test]
fn test_duplicate_hint_skips_text_columns() {
    let table = grid(
        &["code", "label"],
        (0..10)
            .map(|i| vec![json!(i % 2), json!(if i % 2 == 0 { "a" } else { "b" })])
            .collect(),
    );
    let report = assess(&table);
    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(report.recommendations[0].severity, Severity::Info);
    assert_eq!(report.recommendations[0].column, "code");
}

#[test]
fn test_empty_column() {
    let table = grid(&["a", "b"], vec![vec![json!(1), json!(null)], vec![json!(2), json!("")]]);
    let report = assess(&table);
    let b = report.profile("b").unwrap();
    assert_eq!(b.inferred_type, InferredType::Empty);
    assert_eq!(b.completeness, 0.0);
    assert_eq!(b.uniqueness, 0.0);
    let got: Vec<(Severity, &str)> = report
        .recommendations
        .iter()
        .map(|r| (r.severity, r.column.as_str()))
        .collect();
    assert_eq!(got, [(Severity::Warning, "b"), (Severity::Info, "b")]);
}

#[test]
fn test_all_null_column_gets_duplicate_hint() {
    let table = grid(&["a", "b"], (0..10).map(|i| vec![json!(i), json!(null)]).collect());
    let report = assess(&table);
    let got: Vec<(Severity, &str)> = report
        .recommendations
        .iter()
        .map(|r| (r.severity, r.column.as_str()))
        .collect();
    assert_eq!(got, [(Severity::Warning, "b"), (Severity::Info, "b")]);
}

#[test]
fn test_empty_table() {
    let table = grid(&["a"], vec![]);
    let report = assess(&table);
    assert_eq!(report.per_column[0].completeness, 0.0);
    assert_eq!(report.recommendations.len(), 2);
    assert_eq!(report.recommendations[0].severity, Severity::Warning);
    assert_eq!(report.recommendations[1].severity, Severity::Info);
}

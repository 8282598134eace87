//! Integration tests for the full analysis path.

mod common;

use common::{grid, linear_table, sales_table};
use serde_json::json;
use sheet_insights::analysis::{AnalysisOptions, EMPTY_RESULT_NOTICE, analyze};

#[test]
fn test_defaults_to_numeric_columns() {
    let report = analyze(&sales_table(), &AnalysisOptions::default());
    assert_eq!(report.row_count, 6);
    let columns: Vec<&String> = report.summary.keys().collect();
    assert_eq!(columns, ["sales", "units"]);
    assert_eq!(report.correlations.len(), 1);
    assert!(report.skipped.is_empty());
    assert!(report.notice.is_none());
}

#[test]
fn test_text_only_selection_gives_notice() {
    let options = AnalysisOptions {
        columns: Some(vec!["notes".to_string(), "region".to_string()]),
    };
    let report = analyze(&sales_table(), &options);
    assert!(report.summary.is_empty());
    assert!(report.correlations.is_empty());
    assert_eq!(report.notice.as_deref(), Some(EMPTY_RESULT_NOTICE));
    // two column skips plus the one pair
    assert_eq!(report.skipped.len(), 3);
    assert_eq!(report.data_quality.per_column.len(), 5);
}

#[test]
fn test_strongest_correlations() {
    let table = grid(
        &["a", "b", "c"],
        vec![
            vec![json!(1), json!(2), json!(5)],
            vec![json!(2), json!(4), json!(1)],
            vec![json!(3), json!(6), json!(4)],
            vec![json!(4), json!(8), json!(2)],
        ],
    );
    let report = analyze(&table, &AnalysisOptions::default());
    let top = report.strongest_correlations(1);
    assert_eq!(top.len(), 1);
    assert!(top[0].is_pair("a", "b"));
}

#[test]
fn test_report_serializes_for_the_dashboard() {
    let report = analyze(&linear_table(), &AnalysisOptions::default());
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["rowCount"], json!(5));
    assert_eq!(value["summary"]["x"]["standardDeviation"], json!(report.summary["x"].standard_deviation));
    assert_eq!(value["correlations"][0]["strength"], json!("strong"));
    assert_eq!(value["dataQuality"]["perColumn"][0]["inferredType"], json!("numeric"));
}

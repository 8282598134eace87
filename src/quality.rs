//! Per-column data quality profiling: inferred type, completeness,
//! uniqueness, IQR outliers, and the recommendations derived from them.

use crate::table::{CellValue, Table};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Non-null values inspected for type inference.
pub const TYPE_SAMPLE_SIZE: usize = 100;

/// Share of sampled values that must agree on a type.
pub const TYPE_AGREEMENT: f64 = 0.8;

/// Columns below this completeness get a missing-data warning.
pub const COMPLETENESS_THRESHOLD: f64 = 90.0;

/// Non-text columns below this uniqueness get a duplicates hint.
pub const UNIQUENESS_THRESHOLD: f64 = 50.0;

/// Columns above this outlier share get an alert.
pub const OUTLIER_THRESHOLD: f64 = 5.0;

/// Minimum numeric values before outliers are looked for.
pub const MIN_OUTLIER_SAMPLE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferredType {
    Numeric,
    Date,
    Text,
    Empty,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    pub name: String,
    pub inferred_type: InferredType,
    pub completeness: f64,
    pub uniqueness: f64,
    pub outlier_count: usize,
    pub outlier_percentage: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
    Alert,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub column: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityReport {
    pub per_column: Vec<ColumnProfile>,
    pub recommendations: Vec<Recommendation>,
}

impl DataQualityReport {
    pub fn profile(&self, column: &str) -> Option<&ColumnProfile> {
        self.per_column.iter().find(|p| p.name == column)
    }

    /// Names of the columns inferred as numeric, in declaration order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.per_column
            .iter()
            .filter(|p| p.inferred_type == InferredType::Numeric)
            .map(|p| p.name.clone())
            .collect()
    }
}

/// Tukey fences over a set of values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IqrFences {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrFences {
    /// Fences from values already sorted ascending. `None` for fewer than
    /// [`MIN_OUTLIER_SAMPLE`] values.
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        if sorted.len() < MIN_OUTLIER_SAMPLE {
            return None;
        }
        let q1 = quartile_at(sorted, 0.25);
        let q3 = quartile_at(sorted, 0.75);
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            lower: q1 - 1.5 * iqr,
            upper: q3 + 1.5 * iqr,
        })
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Index-floor quantile on sorted, non-empty data: `sorted[floor(n * p)]`.
pub fn quartile_at(sorted: &[f64], p: f64) -> f64 {
    let index = ((sorted.len() as f64) * p).floor() as usize;
    sorted[index.min(sorted.len() - 1)]
}

/// Rounds to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Identity of a non-null cell for distinct counting. `1` and `"1"` differ.
#[derive(Hash, PartialEq, Eq)]
enum CellKey<'a> {
    Number(u64),
    Text(&'a str),
}

fn cell_key(cell: &CellValue) -> Option<CellKey<'_>> {
    match cell {
        CellValue::Null => None,
        CellValue::Number(n) => {
            // -0.0 and 0.0 count as one value
            let n = if *n == 0.0 { 0.0 } else { *n };
            Some(CellKey::Number(n.to_bits()))
        }
        CellValue::Text(s) => Some(CellKey::Text(s.as_str())),
    }
}

/// Infers a column type from its first non-null values.
pub fn infer_type(cells: &[CellValue]) -> InferredType {
    let sample: Vec<&CellValue> = cells
        .iter()
        .filter(|c| !c.is_null())
        .take(TYPE_SAMPLE_SIZE)
        .collect();
    if sample.is_empty() {
        return InferredType::Empty;
    }

    let required = sample.len() as f64 * TYPE_AGREEMENT;
    let numeric = sample.iter().filter(|c| c.as_number().is_some()).count();
    if numeric as f64 >= required {
        return InferredType::Numeric;
    }
    let dates = sample.iter().filter(|c| c.is_date()).count();
    if dates as f64 >= required {
        return InferredType::Date;
    }
    InferredType::Text
}

fn profile_column(name: &str, cells: &[CellValue], total_rows: usize) -> ColumnProfile {
    let inferred_type = infer_type(cells);

    let mut distinct = HashSet::new();
    let mut non_null = 0usize;
    for key in cells.iter().filter_map(cell_key) {
        non_null += 1;
        distinct.insert(key);
    }

    let completeness = if total_rows == 0 {
        0.0
    } else {
        round2(non_null as f64 / total_rows as f64 * 100.0)
    };
    let uniqueness = if non_null == 0 {
        0.0
    } else {
        round2(distinct.len() as f64 / non_null as f64 * 100.0)
    };

    let (outlier_count, outlier_percentage) = if inferred_type == InferredType::Numeric {
        let mut values: Vec<f64> = cells.iter().filter_map(CellValue::as_number).collect();
        values.sort_by(f64::total_cmp);
        match IqrFences::from_sorted(&values) {
            Some(fences) => {
                let count = values.iter().filter(|v| fences.is_outlier(**v)).count();
                (count, round2(count as f64 / values.len() as f64 * 100.0))
            }
            None => (0, 0.0),
        }
    } else {
        (0, 0.0)
    };

    ColumnProfile {
        name: name.to_string(),
        inferred_type,
        completeness,
        uniqueness,
        outlier_count,
        outlier_percentage,
    }
}

/// Builds recommendations in a fixed order: missing data, then duplicates,
/// then outliers; each group in column declaration order.
pub fn recommend(profiles: &[ColumnProfile]) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for p in profiles.iter().filter(|p| p.completeness < COMPLETENESS_THRESHOLD) {
        recommendations.push(Recommendation {
            severity: Severity::Warning,
            column: p.name.clone(),
            message: format!(
                "Column \"{}\" has {:.2}% missing data. Consider filling or removing incomplete rows.",
                p.name,
                round2(100.0 - p.completeness)
            ),
        });
    }

    for p in profiles.iter().filter(|p| {
        p.inferred_type != InferredType::Text && p.uniqueness < UNIQUENESS_THRESHOLD
    }) {
        recommendations.push(Recommendation {
            severity: Severity::Info,
            column: p.name.clone(),
            message: format!(
                "Column \"{}\" is only {:.2}% unique. It may contain duplicates or be better treated as a category.",
                p.name, p.uniqueness
            ),
        });
    }

    for p in profiles.iter().filter(|p| p.outlier_percentage > OUTLIER_THRESHOLD) {
        recommendations.push(Recommendation {
            severity: Severity::Alert,
            column: p.name.clone(),
            message: format!(
                "Column \"{}\" has {} outlier(s) ({:.2}% of values). Review them before drawing conclusions.",
                p.name, p.outlier_count, p.outlier_percentage
            ),
        });
    }

    recommendations
}

/// Profiles every column of the table and derives recommendations.
pub fn assess(table: &Table) -> DataQualityReport {
    let per_column: Vec<ColumnProfile> = table
        .columns()
        .iter()
        .map(|name| {
            let cells = table.column(name).unwrap_or(&[]);
            profile_column(name, cells, table.row_count())
        })
        .collect();
    let recommendations = recommend(&per_column);

    DataQualityReport {
        per_column,
        recommendations,
    }
}

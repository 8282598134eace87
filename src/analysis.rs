//! Analysis path: quality assessment, then descriptive statistics and
//! correlations over the chosen numeric columns.

use crate::correlation::{self, CorrelationResult};
use crate::error::StatsError;
use crate::quality::{self, DataQualityReport};
use crate::stats::{self, DescriptiveStats};
use crate::table::Table;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// Shown when none of the requested columns could be summarized.
pub const EMPTY_RESULT_NOTICE: &str = "No numeric data available for analysis.";

/// Which columns the analysis runs on.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOptions {
    /// Explicit column list; the inferred numeric columns when absent
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

/// Output contract consumed by the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub row_count: usize,
    pub summary: IndexMap<String, DescriptiveStats>,
    pub correlations: Vec<CorrelationResult>,
    pub data_quality: DataQualityReport,
    /// Columns and pairs left out for lack of data
    pub skipped: Vec<StatsError>,
    pub notice: Option<String>,
}

impl AnalysisReport {
    /// Correlations sorted by decreasing |r|, keeping the stable pair order on ties.
    pub fn strongest_correlations(&self, limit: usize) -> Vec<&CorrelationResult> {
        let mut ranked: Vec<&CorrelationResult> = self.correlations.iter().collect();
        ranked.sort_by(|a, b| b.coefficient.abs().total_cmp(&a.coefficient.abs()));
        ranked.truncate(limit);
        ranked
    }
}

pub fn analyze(table: &Table, options: &AnalysisOptions) -> AnalysisReport {
    let data_quality = quality::assess(table);
    let columns = match &options.columns {
        Some(columns) => columns.clone(),
        None => data_quality.numeric_columns(),
    };
    debug!(
        "analyzing {} rows over {} columns",
        table.row_count(),
        columns.len()
    );

    let described = stats::describe(table, &columns);
    let correlated = correlation::correlate_all(table, &columns);

    let notice = described
        .stats
        .is_empty()
        .then(|| EMPTY_RESULT_NOTICE.to_string());

    let mut skipped = described.skipped;
    skipped.extend(correlated.skipped);

    AnalysisReport {
        row_count: table.row_count(),
        summary: described.stats,
        correlations: correlated.results,
        data_quality,
        skipped,
        notice,
    }
}

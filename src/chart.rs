//! Category/value data shared by the chart renderers and the legend, and the
//! dispatch from a chart type to its scene.

use crate::column;
use crate::error::PayloadError;
use crate::pie;
use crate::scene::{CanvasSize, Scene};
use crate::table::Table;
use crate::view::{ChartKind, ChartViewState};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    /// Pairs labels with values. Lengths must match and every value must be finite.
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Result<Self, PayloadError> {
        let data = Self { labels, values };
        data.validate()?;
        Ok(data)
    }

    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.labels.len() != self.values.len() {
            return Err(PayloadError::Invalid(format!(
                "{} labels but {} values",
                self.labels.len(),
                self.values.len()
            )));
        }
        if let Some(i) = self.values.iter().position(|v| !v.is_finite()) {
            return Err(PayloadError::Invalid(format!(
                "value for {:?} is not a finite number",
                self.labels[i]
            )));
        }
        Ok(())
    }

    /// Groups rows by the label column (first-occurrence order) and sums the
    /// value column. Rows with a null label or an unparsable value are skipped.
    pub fn from_columns(table: &Table, label_column: &str, value_column: &str) -> Option<Self> {
        let labels = table.column(label_column)?;
        let values = table.column(value_column)?;

        let mut groups: IndexMap<String, f64> = IndexMap::new();
        let mut skipped = 0usize;
        for (label, value) in labels.iter().zip(values) {
            match (label.label(), value.as_number()) {
                (Some(label), Some(value)) => *groups.entry(label).or_insert(0.0) += value,
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!(
                "{} rows without a usable {:?}/{:?} pair were left out of the chart",
                skipped, label_column, value_column
            );
        }

        let (labels, values) = groups.into_iter().unzip();
        Some(Self { labels, values })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sum of the values a pie would show (negative values count as zero).
    pub fn positive_total(&self) -> f64 {
        self.values.iter().map(|v| v.max(0.0)).sum()
    }

    /// Share of each category in percent; all zero when the total is not positive.
    pub fn shares(&self) -> Vec<f64> {
        let total = self.positive_total();
        self.values
            .iter()
            .map(|v| {
                if total > 0.0 {
                    v.max(0.0) / total * 100.0
                } else {
                    0.0
                }
            })
            .collect()
    }
}

/// Chart types a dashboard can save.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    Pie3d,
    Column3d,
    Bar,
    Line,
    Scatter,
    Area,
}

impl ChartType {
    /// The hand-drawn projection behind this type, if any.
    pub fn kind(&self) -> Option<ChartKind> {
        match self {
            ChartType::Pie3d => Some(ChartKind::Pie),
            ChartType::Column3d => Some(ChartKind::Column),
            _ => None,
        }
    }
}

/// Pure scene for a pseudo-3D chart.
pub fn render_scene(kind: ChartKind, data: &ChartData, view: &ChartViewState, size: CanvasSize) -> Scene {
    match kind {
        ChartKind::Pie => pie::PieLayout::compute(data, view, size).scene(),
        ChartKind::Column => column::ColumnLayout::compute(data, view, size).scene(),
    }
}

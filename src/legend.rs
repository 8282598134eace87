//! Legend grid keyed to the chart colors.

use crate::chart::ChartData;
use crate::color::{Rgb, color_for};
use crate::scene::{CanvasSize, Point, Scene, TextAlign, ellipsize};
use crate::table::format_number;
use serde::{Deserialize, Serialize};

pub const ROW_HEIGHT: f64 = 24.0;
pub const MIN_HEIGHT: u32 = 60;
pub const PADDING: f64 = 24.0;
pub const SUMMARY_HEIGHT: f64 = 24.0;
/// Legends with more entries than this get a summary line.
pub const SUMMARY_THRESHOLD: usize = 8;
pub const MIN_ITEM_WIDTH: f64 = 140.0;
pub const SIDE_PADDING: f64 = 16.0;
pub const SWATCH: f64 = 14.0;
pub const SWATCH_GAP: f64 = 6.0;
pub const CHAR_WIDTH: f64 = 7.0;
pub const FONT_SIZE: u32 = 12;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub value: f64,
    /// Share of the total, one decimal
    pub percentage: String,
    pub color: Rgb,
}

/// One entry per category, colored exactly like the chart.
pub fn entries(data: &ChartData) -> Vec<LegendEntry> {
    let n = data.len();
    data.labels
        .iter()
        .zip(&data.values)
        .zip(data.shares())
        .enumerate()
        .map(|(i, ((label, value), share))| LegendEntry {
            label: label.clone(),
            value: *value,
            percentage: format!("{:.1}", share),
            color: color_for(i, n),
        })
        .collect()
}

/// Allowed grid column counts for `count` entries.
pub fn column_range(count: usize) -> (usize, usize) {
    match count {
        0..=4 => (1, 2),
        5..=8 => (2, 3),
        9..=12 => (2, 4),
        _ => (3, 4),
    }
}

/// Grid columns for `count` entries on a legend `width` pixels wide.
pub fn grid_columns(count: usize, width: u32) -> usize {
    let (lo, hi) = column_range(count);
    let fitting = ((width as f64 - 2.0 * SIDE_PADDING) / MIN_ITEM_WIDTH).floor() as usize;
    fitting.clamp(lo, hi).min(count).max(1)
}

/// `max(MIN_HEIGHT, ceil(items / per_row) * ROW_HEIGHT + padding)`; the
/// padding grows by one line when a summary is shown.
pub fn legend_height(count: usize, per_row: usize) -> u32 {
    let rows = count.div_ceil(per_row.max(1));
    let padding = if count > SUMMARY_THRESHOLD {
        PADDING + SUMMARY_HEIGHT
    } else {
        PADDING
    };
    let height = (rows as f64 * ROW_HEIGHT + padding).ceil() as u32;
    height.max(MIN_HEIGHT)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendItem {
    pub entry: LegendEntry,
    pub row: usize,
    pub column: usize,
    /// Swatch top-left corner
    pub origin: Point,
    /// `label: pct%`, ellipsized to the cell width
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendLayout {
    pub size: CanvasSize,
    pub columns: usize,
    pub rows: usize,
    pub item_width: f64,
    pub items: Vec<LegendItem>,
    pub summary: Option<String>,
}

fn item_text(entry: &LegendEntry, max_chars: usize) -> String {
    let suffix = format!(": {}%", entry.percentage);
    let label_chars = max_chars.saturating_sub(suffix.chars().count()).max(1);
    format!("{}{}", ellipsize(&entry.label, label_chars), suffix)
}

impl LegendLayout {
    pub fn compute(data: &ChartData, width: u32) -> Self {
        let entries = entries(data);
        let count = entries.len();
        let columns = grid_columns(count, width);
        let rows = count.div_ceil(columns);
        let height = legend_height(count, columns);

        let item_width = (width as f64 - 2.0 * SIDE_PADDING).max(0.0) / columns as f64;
        let max_chars = ((item_width - SWATCH - SWATCH_GAP - 8.0) / CHAR_WIDTH).floor().max(0.0) as usize;

        let items = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let row = i / columns;
                let column = i % columns;
                let origin = Point::new(
                    SIDE_PADDING + column as f64 * item_width,
                    PADDING / 2.0 + row as f64 * ROW_HEIGHT + (ROW_HEIGHT - SWATCH) / 2.0,
                );
                LegendItem {
                    text: item_text(&entry, max_chars),
                    entry,
                    row,
                    column,
                    origin,
                }
            })
            .collect();

        let summary = (count > SUMMARY_THRESHOLD).then(|| {
            format!("{} categories • Total: {}", count, format_number(data.positive_total()))
        });

        Self {
            size: CanvasSize::new(width, height),
            columns,
            rows,
            item_width,
            items,
            summary,
        }
    }

    /// Splits the items into pages of `rows_per_page` grid rows for the
    /// scrollable panel.
    pub fn pages(&self, rows_per_page: usize) -> Vec<&[LegendItem]> {
        let per_page = (rows_per_page.max(1) * self.columns).max(1);
        self.items.chunks(per_page).collect()
    }

    pub fn scene(&self) -> Scene {
        let mut scene = Scene::new(self.size);
        for item in &self.items {
            scene.fill_rect(item.origin, SWATCH, SWATCH, item.entry.color);
            scene.text(
                item.text.clone(),
                item.origin.offset(SWATCH + SWATCH_GAP, SWATCH / 2.0),
                FONT_SIZE,
                Rgb::TEXT,
                TextAlign::Left,
            );
        }
        if let Some(summary) = &self.summary {
            scene.text(
                summary.clone(),
                Point::new(
                    self.size.width as f64 / 2.0,
                    self.size.height as f64 - SUMMARY_HEIGHT / 2.0 - PADDING / 4.0,
                ),
                FONT_SIZE,
                Rgb::MUTED,
                TextAlign::Center,
            );
        }
        scene
    }
}

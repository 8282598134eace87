//! Pseudo-3D columns: one isometric prism per category.
//!
//! Heights are scaled between the smallest and largest value, so the smallest
//! category sits on the baseline. The prism depth is offset at a fixed angle;
//! the view tilt squashes it vertically and zoom scales the whole group around
//! the canvas center. Rotation does not apply to columns.

use crate::chart::ChartData;
use crate::color::{HIGHLIGHT_SHIFT, Rgb, SHADOW_SHIFT, hsl_for};
use crate::pie::NO_DATA_MESSAGE;
use crate::scene::{CanvasSize, Point, Scene, TextAlign, ellipsize};
use crate::table::format_number;
use crate::view::{ChartViewState, DEFAULT_TILT};
use serde::Serialize;
use std::f64::consts::PI;

pub const SIDE_MARGIN: f64 = 40.0;
pub const TOP_MARGIN: f64 = 30.0;
pub const BOTTOM_MARGIN: f64 = 40.0;
pub const MIN_COLUMN_WIDTH: f64 = 12.0;
pub const MAX_COLUMN_WIDTH: f64 = 60.0;
/// Share of each slot taken by the column body.
pub const FILL_RATIO: f64 = 0.6;
/// Isometric offset angle of the depth faces.
pub const ISO_ANGLE: f64 = PI / 6.0;
/// Column depth as a share of its width.
pub const DEPTH_RATIO: f64 = 0.5;
/// Room kept above the tallest column for its value label.
pub const LABEL_ROOM: f64 = 16.0;
/// Smallest column that still gets a value label.
pub const MIN_LABEL_WIDTH: f64 = 24.0;
pub const MIN_LABEL_HEIGHT: f64 = 14.0;
/// Approximate glyph width used to fit category labels.
pub const CHAR_WIDTH: f64 = 7.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Prism {
    pub index: usize,
    pub label: String,
    pub value: f64,
    /// Front face, top-left corner
    pub x: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub front: Rgb,
    pub top_color: Rgb,
    pub side: Rgb,
    pub show_value: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnLayout {
    pub size: CanvasSize,
    pub baseline: f64,
    pub slot: f64,
    pub column_width: f64,
    /// Isometric offset of the back faces (`dy` is negative: up)
    pub depth_dx: f64,
    pub depth_dy: f64,
    pub prisms: Vec<Prism>,
}

/// Column body width for `count` categories in `plot_width` pixels.
pub fn column_width(plot_width: f64, count: usize) -> f64 {
    let slot = plot_width / count.max(1) as f64;
    (slot * FILL_RATIO).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
}

impl ColumnLayout {
    pub fn compute(data: &ChartData, view: &ChartViewState, size: CanvasSize) -> Self {
        let n = data.len();
        let zoom = view.zoom;
        let (w, h) = (size.width as f64, size.height as f64);
        let plot_width = (w - 2.0 * SIDE_MARGIN).max(0.0);

        let slot = plot_width / n.max(1) as f64 * zoom;
        let width = column_width(plot_width, n) * zoom;
        let depth = width * DEPTH_RATIO;
        let depth_dx = depth * ISO_ANGLE.cos();
        let depth_dy = -depth * ISO_ANGLE.sin() * (view.tilt_angle / DEFAULT_TILT);

        let baseline = h - BOTTOM_MARGIN;
        let available = (baseline - TOP_MARGIN + depth_dy - LABEL_ROOM).max(0.0);
        let start_x = w / 2.0 - slot * n as f64 / 2.0;

        let min = data.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let spread = max - min;

        let prisms = data
            .labels
            .iter()
            .zip(&data.values)
            .enumerate()
            .map(|(index, (label, &value))| {
                // equal values sit flat on the baseline
                let fraction = if spread > 0.0 { (value - min) / spread } else { 0.0 };
                let height = fraction * available * zoom;
                let hsl = hsl_for(index, n);
                Prism {
                    index,
                    label: label.clone(),
                    value,
                    x: start_x + index as f64 * slot + (slot - width) / 2.0,
                    top: baseline - height,
                    width,
                    height,
                    front: hsl.to_rgb(),
                    top_color: hsl.shifted(HIGHLIGHT_SHIFT).to_rgb(),
                    side: hsl.shifted(SHADOW_SHIFT).to_rgb(),
                    show_value: width >= MIN_LABEL_WIDTH && height >= MIN_LABEL_HEIGHT,
                }
            })
            .collect();

        Self {
            size,
            baseline,
            slot,
            column_width: width,
            depth_dx,
            depth_dy,
            prisms,
        }
    }

    /// Left to right, each prism as side, front, top; labels last.
    pub fn scene(&self) -> Scene {
        if self.prisms.is_empty() {
            return Scene::placeholder(self.size, NO_DATA_MESSAGE);
        }
        let mut scene = Scene::new(self.size);
        let (dx, dy) = (self.depth_dx, self.depth_dy);

        let first = &self.prisms[0];
        let last = &self.prisms[self.prisms.len() - 1];
        scene.stroke(
            vec![
                Point::new(first.x, self.baseline),
                Point::new(last.x + last.width + dx, self.baseline),
            ],
            Rgb::MUTED,
            1,
            false,
        );

        for p in &self.prisms {
            let left = p.x;
            let right = p.x + p.width;
            let top = p.top;
            let bottom = self.baseline;

            scene.fill_polygon(
                vec![
                    Point::new(right, top),
                    Point::new(right + dx, top + dy),
                    Point::new(right + dx, bottom + dy),
                    Point::new(right, bottom),
                ],
                p.side,
            );
            scene.fill_polygon(
                vec![
                    Point::new(left, top),
                    Point::new(right, top),
                    Point::new(right, bottom),
                    Point::new(left, bottom),
                ],
                p.front,
            );
            scene.fill_polygon(
                vec![
                    Point::new(left, top),
                    Point::new(right, top),
                    Point::new(right + dx, top + dy),
                    Point::new(left + dx, top + dy),
                ],
                p.top_color,
            );
        }

        let max_chars = (self.slot / CHAR_WIDTH).floor() as usize;
        for p in &self.prisms {
            let center = p.x + p.width / 2.0;
            if p.show_value {
                scene.text(
                    format_number(p.value),
                    Point::new(center + dx / 2.0, p.top + dy - 8.0),
                    11,
                    Rgb::TEXT,
                    TextAlign::Center,
                );
            }
            if max_chars >= 3 {
                scene.text(
                    ellipsize(&p.label, max_chars),
                    Point::new(center, self.baseline + 14.0),
                    11,
                    Rgb::MUTED,
                    TextAlign::Center,
                );
            }
        }
        scene
    }
}

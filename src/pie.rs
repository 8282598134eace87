//! Pseudo-3D pie: an ellipse extruded downward to fake a cylinder.
//!
//! Slices run clockwise (screen orientation) from 12 o'clock plus the view
//! rotation, in input order with no gaps. Only the front half of the rim
//! (where `sin θ > 0`) shows a side wall.

use crate::chart::ChartData;
use crate::color::{Rgb, SHADOW_SHIFT, hsl_for};
use crate::scene::{CanvasSize, Point, Scene, TextAlign, arc_points};
use crate::view::ChartViewState;
use log::debug;
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Base radius as a share of the smaller canvas side.
pub const RADIUS_RATIO: f64 = 0.35;
/// Extrusion depth as a share of the horizontal radius, before tilt.
pub const DEPTH_RATIO: f64 = 0.2;
/// Angular resolution of arcs.
pub const ARC_STEP: f64 = PI / 90.0;
/// Inline labels sit at this share of the radius.
pub const LABEL_RADIUS: f64 = 0.65;

pub const NO_DATA_MESSAGE: &str = "No data to display";

/// Minimum sweep (radians) a slice needs for an inline label. Fewer
/// categories mean a larger threshold.
pub fn label_threshold(categories: usize) -> f64 {
    (0.6 / categories.max(1) as f64).clamp(0.08, 0.3)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieSlice {
    pub index: usize,
    pub label: String,
    pub value: f64,
    pub percentage: f64,
    pub start_angle: f64,
    pub sweep: f64,
    pub color: Rgb,
    pub shadow: Rgb,
    /// Where the inline percentage goes, when the slice is wide enough
    pub label_at: Option<Point>,
}

impl PieSlice {
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep
    }

    /// Parts of the slice rim that face the viewer, as `(from, to)` angles.
    pub fn visible_rim(&self) -> Vec<(f64, f64)> {
        let start = self.start_angle;
        let end = self.end_angle();
        let first = (start / TAU).floor() as i64 - 1;
        let last = (end / TAU).floor() as i64 + 1;
        (first..=last)
            .filter_map(|k| {
                let lo = start.max(k as f64 * TAU);
                let hi = end.min(k as f64 * TAU + PI);
                (hi > lo).then_some((lo, hi))
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieLayout {
    pub size: CanvasSize,
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    pub depth: f64,
    pub zoom: f64,
    pub slices: Vec<PieSlice>,
}

impl PieLayout {
    pub fn compute(data: &ChartData, view: &ChartViewState, size: CanvasSize) -> Self {
        let tilt = view.tilt_angle;
        let radius_x = size.width.min(size.height) as f64 * RADIUS_RATIO * view.zoom;
        let radius_y = radius_x * tilt;
        let depth = radius_x * DEPTH_RATIO * (1.2 - tilt);
        let center = Point::new(
            size.width as f64 / 2.0,
            size.height as f64 / 2.0 - depth / 2.0,
        );

        let total = data.positive_total();
        let mut slices = Vec::with_capacity(data.len());
        if total > 0.0 {
            let threshold = label_threshold(data.len());
            let mut angle = -FRAC_PI_2 + view.rotation;
            for (index, (label, value)) in data.labels.iter().zip(&data.values).enumerate() {
                let value = value.max(0.0);
                let sweep = TAU * (value / total);
                let hsl = hsl_for(index, data.len());
                let mid = angle + sweep / 2.0;
                let label_at = (sweep > threshold).then(|| {
                    Point::new(
                        center.x + radius_x * LABEL_RADIUS * mid.cos(),
                        center.y + radius_y * LABEL_RADIUS * mid.sin(),
                    )
                });
                slices.push(PieSlice {
                    index,
                    label: label.clone(),
                    value,
                    percentage: value / total * 100.0,
                    start_angle: angle,
                    sweep,
                    color: hsl.to_rgb(),
                    shadow: hsl.shifted(SHADOW_SHIFT).to_rgb(),
                    label_at,
                });
                angle += sweep;
            }
        } else {
            debug!("pie total is not positive, nothing to draw");
        }

        Self {
            size,
            center,
            radius_x,
            radius_y,
            depth,
            zoom: view.zoom,
            slices,
        }
    }

    /// Side walls first, then tops, then borders and labels.
    pub fn scene(&self) -> Scene {
        if self.slices.is_empty() {
            return Scene::placeholder(self.size, NO_DATA_MESSAGE);
        }
        let mut scene = Scene::new(self.size);
        let (c, rx, ry) = (self.center, self.radius_x, self.radius_y);

        for slice in &self.slices {
            for (lo, hi) in slice.visible_rim() {
                let mut wall = arc_points(c, rx, ry, lo, hi, ARC_STEP);
                let bottom: Vec<Point> = wall.iter().rev().map(|p| p.offset(0.0, self.depth)).collect();
                wall.extend(bottom);
                scene.fill_polygon(wall, slice.shadow);
            }
        }

        let mut outlines = Vec::with_capacity(self.slices.len());
        for slice in &self.slices {
            if slice.sweep <= 0.0 {
                continue;
            }
            let mut top = vec![c];
            top.extend(arc_points(c, rx, ry, slice.start_angle, slice.end_angle(), ARC_STEP));
            scene.fill_polygon(top.clone(), slice.color);
            outlines.push(top);
        }
        for outline in outlines {
            scene.stroke(outline, Rgb::BORDER, 1, true);
        }

        let font = ((12.0 * self.zoom).round() as u32).max(9);
        for slice in &self.slices {
            if let Some(at) = slice.label_at {
                scene.text(
                    format!("{:.1}%", slice.percentage),
                    at,
                    font,
                    Rgb::WHITE,
                    TextAlign::Center,
                );
            }
        }
        scene
    }
}

//! Backend-independent geometry description.
//!
//! Chart and legend layout produce a [`Scene`]: an ordered list of 2D drawing
//! commands in pixel coordinates (origin top-left, y down). A [`crate::canvas::Canvas`]
//! replays it against an actual drawing surface.

use crate::color::Rgb;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Pixel size of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(600, 400)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    FillPolygon {
        points: Vec<Point>,
        color: Rgb,
    },
    StrokePolyline {
        points: Vec<Point>,
        color: Rgb,
        width: u32,
        closed: bool,
    },
    FillRect {
        origin: Point,
        width: f64,
        height: f64,
        color: Rgb,
    },
    /// `at` is the vertical middle of the text line
    Text {
        text: String,
        at: Point,
        size: u32,
        color: Rgb,
        align: TextAlign,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub size: CanvasSize,
    pub background: Rgb,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            size,
            background: Rgb::WHITE,
            commands: Vec::new(),
        }
    }

    pub fn fill_polygon(&mut self, points: Vec<Point>, color: Rgb) {
        self.commands.push(DrawCommand::FillPolygon { points, color });
    }

    pub fn stroke(&mut self, points: Vec<Point>, color: Rgb, width: u32, closed: bool) {
        self.commands.push(DrawCommand::StrokePolyline {
            points,
            color,
            width,
            closed,
        });
    }

    pub fn fill_rect(&mut self, origin: Point, width: f64, height: f64, color: Rgb) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            width,
            height,
            color,
        });
    }

    pub fn text(&mut self, text: impl Into<String>, at: Point, size: u32, color: Rgb, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            at,
            size,
            color,
            align,
        });
    }

    /// Centered notice used when there is nothing to plot.
    pub fn placeholder(size: CanvasSize, message: &str) -> Self {
        let mut scene = Self::new(size);
        scene.text(
            message,
            Point::new(size.width as f64 / 2.0, size.height as f64 / 2.0),
            14,
            Rgb::MUTED,
            TextAlign::Center,
        );
        scene
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Shortens `text` to at most `max_chars` characters, ending in an ellipsis.
pub fn ellipsize(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut short: String = text.chars().take(max_chars - 1).collect();
    short.push('…');
    short
}

/// Points along an axis-aligned ellipse arc from `start` to `end` (radians,
/// screen orientation), endpoints included.
pub fn arc_points(center: Point, rx: f64, ry: f64, start: f64, end: f64, step: f64) -> Vec<Point> {
    let span = end - start;
    let segments = ((span.abs() / step).ceil() as usize).max(1);
    (0..=segments)
        .map(|i| {
            let angle = start + span * (i as f64 / segments as f64);
            Point::new(center.x + rx * angle.cos(), center.y + ry * angle.sin())
        })
        .collect()
}

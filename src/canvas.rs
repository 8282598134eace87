//! Drawing-surface abstraction and the bitmap interpreter for [`Scene`]s.

use crate::color::Rgb;
use crate::error::RenderError;
use crate::scene::{CanvasSize, DrawCommand, Point, Scene, TextAlign};
use image::RgbImage;
use log::warn;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;

/// Largest surface we agree to allocate, in pixels.
pub const MAX_PIXELS: u64 = 64_000_000;

/// Font family requested for every text command.
pub const FONT_FAMILY: &str = "sans-serif";

/// Any 2D API able to draw the primitives of a [`Scene`].
pub trait Canvas {
    fn clear(&mut self, color: Rgb) -> Result<(), RenderError>;
    fn fill_polygon(&mut self, points: &[Point], color: Rgb) -> Result<(), RenderError>;
    fn stroke_polyline(
        &mut self,
        points: &[Point],
        color: Rgb,
        width: u32,
        closed: bool,
    ) -> Result<(), RenderError>;
    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, color: Rgb) -> Result<(), RenderError>;
    fn text(&mut self, text: &str, at: Point, size: u32, color: Rgb, align: TextAlign) -> Result<(), RenderError>;
}

/// Replays every command of `scene`, in order.
pub fn draw_scene<C: Canvas + ?Sized>(scene: &Scene, canvas: &mut C) -> Result<(), RenderError> {
    canvas.clear(scene.background)?;
    for command in &scene.commands {
        match command {
            DrawCommand::FillPolygon { points, color } => canvas.fill_polygon(points, *color)?,
            DrawCommand::StrokePolyline {
                points,
                color,
                width,
                closed,
            } => canvas.stroke_polyline(points, *color, *width, *closed)?,
            DrawCommand::FillRect {
                origin,
                width,
                height,
                color,
            } => canvas.fill_rect(*origin, *width, *height, *color)?,
            DrawCommand::Text {
                text,
                at,
                size,
                color,
                align,
            } => canvas.text(text, *at, *size, *color, *align)?,
        }
    }
    Ok(())
}

pub(crate) fn to_rgb(color: Rgb) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn to_pixel(p: &Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

pub(crate) fn drawing_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

/// Plotters bitmap area as a [`Canvas`].
///
/// Text needs a font registered with plotters (see [`crate::config`]). When
/// none is available, text commands are skipped with a warning and the shapes
/// still render.
pub struct BitmapCanvas<'a, 'b> {
    area: &'a DrawingArea<BitMapBackend<'b>, Shift>,
    text_unavailable: bool,
}

impl<'a, 'b> BitmapCanvas<'a, 'b> {
    pub fn new(area: &'a DrawingArea<BitMapBackend<'b>, Shift>) -> Self {
        Self {
            area,
            text_unavailable: false,
        }
    }
}

impl Canvas for BitmapCanvas<'_, '_> {
    fn clear(&mut self, color: Rgb) -> Result<(), RenderError> {
        self.area.fill(&to_rgb(color)).map_err(drawing_error)
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgb) -> Result<(), RenderError> {
        if points.len() < 3 {
            return Ok(());
        }
        let pixels: Vec<(i32, i32)> = points.iter().map(to_pixel).collect();
        self.area
            .draw(&Polygon::new(pixels, to_rgb(color).filled()))
            .map_err(drawing_error)
    }

    fn stroke_polyline(
        &mut self,
        points: &[Point],
        color: Rgb,
        width: u32,
        closed: bool,
    ) -> Result<(), RenderError> {
        if points.len() < 2 {
            return Ok(());
        }
        let mut pixels: Vec<(i32, i32)> = points.iter().map(to_pixel).collect();
        if closed {
            pixels.push(pixels[0]);
        }
        self.area
            .draw(&PathElement::new(pixels, to_rgb(color).stroke_width(width)))
            .map_err(drawing_error)
    }

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, color: Rgb) -> Result<(), RenderError> {
        let top_left = to_pixel(&origin);
        let bottom_right = to_pixel(&origin.offset(width, height));
        self.area
            .draw(&Rectangle::new([top_left, bottom_right], to_rgb(color).filled()))
            .map_err(drawing_error)
    }

    fn text(&mut self, text: &str, at: Point, size: u32, color: Rgb, align: TextAlign) -> Result<(), RenderError> {
        if self.text_unavailable || text.is_empty() {
            return Ok(());
        }
        let h = match align {
            TextAlign::Left => HPos::Left,
            TextAlign::Center => HPos::Center,
            TextAlign::Right => HPos::Right,
        };
        let style = (FONT_FAMILY, size as f64)
            .into_font()
            .color(&to_rgb(color))
            .pos(Pos::new(h, VPos::Center));
        if let Err(e) = self.area.draw_text(text, &style, to_pixel(&at)) {
            warn!("text rendering unavailable, labels will be omitted: {}", e);
            self.text_unavailable = true;
        }
        Ok(())
    }
}

/// Creates a surface of `size`, or fails with `RenderTargetUnavailable`.
pub(crate) fn surface(size: CanvasSize) -> Result<Vec<u8>, RenderError> {
    let CanvasSize { width, height } = size;
    let pixels = width as u64 * height as u64;
    if size.is_empty() || pixels > MAX_PIXELS {
        return Err(RenderError::RenderTargetUnavailable { width, height });
    }
    Ok(vec![0u8; pixels as usize * 3])
}

/// Rasterizes a scene into an RGB image of exactly `scene.size`.
pub fn rasterize(scene: &Scene) -> Result<RgbImage, RenderError> {
    let CanvasSize { width, height } = scene.size;
    let mut buffer = surface(scene.size)?;
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        let mut canvas = BitmapCanvas::new(&root);
        draw_scene(scene, &mut canvas)?;
        root.present().map_err(drawing_error)?;
    }
    RgbImage::from_raw(width, height, buffer)
        .ok_or(RenderError::RenderTargetUnavailable { width, height })
}

/// PNG bytes of an image.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(image.clone())
        .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)?;
    Ok(bytes)
}

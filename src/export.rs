//! Composite export: chart raster stacked over its legend raster.

use crate::canvas::{encode_png, rasterize};
use crate::chart::{ChartData, render_scene};
use crate::error::RenderError;
use crate::legend::{LegendLayout, grid_columns, legend_height};
use crate::scene::CanvasSize;
use crate::view::{ChartKind, ChartViewState};
use image::RgbImage;
use log::info;
use std::io::Write;
use std::path::Path;

/// Pixel size of the exported image for `categories` entries on a chart of
/// `chart` size. Depends only on its inputs.
pub fn export_dimensions(chart: CanvasSize, categories: usize) -> CanvasSize {
    let per_row = grid_columns(categories, chart.width);
    CanvasSize::new(chart.width, chart.height + legend_height(categories, per_row))
}

/// Chart and legend rendered and stacked vertically.
pub fn composite(
    kind: ChartKind,
    data: &ChartData,
    view: &ChartViewState,
    chart: CanvasSize,
) -> Result<RgbImage, RenderError> {
    if chart.is_empty() {
        return Err(RenderError::RenderTargetUnavailable {
            width: chart.width,
            height: chart.height,
        });
    }
    let chart_image = rasterize(&render_scene(kind, data, view, chart))?;
    let legend_image = rasterize(&LegendLayout::compute(data, chart.width).scene())?;

    let size = export_dimensions(chart, data.len());
    let mut out = RgbImage::new(size.width, size.height);
    image::imageops::replace(&mut out, &chart_image, 0, 0);
    image::imageops::replace(&mut out, &legend_image, 0, chart.height as i64);
    Ok(out)
}

/// PNG bytes of the composite image.
pub fn export_png(
    kind: ChartKind,
    data: &ChartData,
    view: &ChartViewState,
    chart: CanvasSize,
) -> Result<Vec<u8>, RenderError> {
    encode_png(&composite(kind, data, view, chart)?)
}

/// Writes the composite PNG to `path`. The image is rendered completely and
/// written to a temporary file next to `path` first, so a failure never
/// leaves a partial file behind.
pub fn export_to_file(
    path: impl AsRef<Path>,
    kind: ChartKind,
    data: &ChartData,
    view: &ChartViewState,
    chart: CanvasSize,
) -> Result<(), RenderError> {
    let path = path.as_ref();
    let bytes = export_png(kind, data, view, chart)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.persist(path).map_err(|e| RenderError::Io(e.error))?;
    info!(
        "exported {:?} chart with {} categories to {}",
        kind,
        data.len(),
        path.display()
    );
    Ok(())
}

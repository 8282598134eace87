use crate::canvas::{drawing_error, encode_png, surface, to_rgb, FONT_FAMILY};
use crate::chart::{ChartData, ChartType};
use crate::color::color_for;
use crate::error::RenderError;
use crate::scene::CanvasSize;
use image::RgbImage;
use log::warn;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};

/// Most category names printed under the x axis.
const MAX_X_LABELS: usize = 20;

/// Standard 2D chart types drawn through the plotting library
///
/// Pie and column charts have their own pseudo-3D projection; everything else
/// a dashboard saves is drawn here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GraphType {
    /// Line graph - Shows trends across categories with connected points
    Line,

    /// Bar graph - Compares values across categories with flat bars
    Bar,

    /// Scatter plot - One marker per category, no connecting line
    Scatter,

    /// Area graph - Line graph with the area down to zero filled in
    Area,
}

impl GraphType {
    /// Maps a saved chart type to its standard graph, if it has one
    ///
    /// # Returns
    /// * `None` for the pseudo-3D pie and column types
    pub fn from_chart_type(chart_type: ChartType) -> Option<Self> {
        match chart_type {
            ChartType::Bar => Some(GraphType::Bar),
            ChartType::Line => Some(GraphType::Line),
            ChartType::Scatter => Some(GraphType::Scatter),
            ChartType::Area => Some(GraphType::Area),
            ChartType::Pie3d | ChartType::Column3d => None,
        }
    }
}

/// Configuration options for standard chart generation
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphOptions {
    /// Title displayed at the top of the graph
    pub title: String,

    /// Label for the X-axis
    pub x_label: String,

    /// Label for the Y-axis
    pub y_label: String,

    /// Width of the graph in pixels
    pub width: u32,

    /// Height of the graph in pixels
    pub height: u32,

    /// Type of graph to generate
    pub graph_type: GraphType,
}

impl Default for GraphOptions {
    /// Creates a default configuration
    ///
    /// # Returns
    /// * `GraphOptions` - Line graph, 800x600 pixels, generic labels
    fn default() -> Self {
        Self {
            title: "Graph".to_string(),
            x_label: "X Axis".to_string(),
            y_label: "Y Axis".to_string(),
            width: 800,
            height: 600,
            graph_type: GraphType::Line,
        }
    }
}

/// Vertical range covering every value and zero, with a little headroom
fn value_range(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().copied().fold(0.0, f64::min);
    let hi = values.iter().copied().fold(0.0, f64::max);
    if hi - lo <= 0.0 {
        return (lo, lo + 1.0);
    }
    (lo, hi + (hi - lo) * 0.05)
}

/// Renders a standard chart of category data to PNG bytes
///
/// Categories are placed at x = 0, 1, 2, ... in data order and named on the
/// x axis. The image is drawn in memory; nothing touches the filesystem.
///
/// # Arguments
/// * `data` - Category labels and values
/// * `options` - Graph styling and type options
///
/// # Returns
/// * A Result containing the PNG image data as bytes or a `RenderError`
///
/// # Notes
/// * When no font is registered the chart is redrawn without any text
pub fn render_standard_chart(data: &ChartData, options: &GraphOptions) -> Result<Vec<u8>, RenderError> {
    data.validate()
        .map_err(|e| RenderError::Drawing(e.to_string()))?;
    let size = CanvasSize::new(options.width, options.height);
    let mut buffer = surface(size)?;

    if let Err(e) = draw_standard(&mut buffer, data, options, true) {
        warn!("chart text unavailable, drawing without labels: {}", e);
        draw_standard(&mut buffer, data, options, false)?;
    }

    let image = RgbImage::from_raw(size.width, size.height, buffer).ok_or(
        RenderError::RenderTargetUnavailable {
            width: size.width,
            height: size.height,
        },
    )?;
    encode_png(&image)
}

/// Draws one complete chart into `buffer`, optionally with caption and axis text
fn draw_standard(
    buffer: &mut [u8],
    data: &ChartData,
    options: &GraphOptions,
    with_text: bool,
) -> Result<(), RenderError> {
    let root = BitMapBackend::with_buffer(buffer, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing_error)?;

    let n = data.len();
    let (lo, hi) = value_range(&data.values);
    let x_range = -0.5..(n.max(1) as f64 - 0.5);

    let mut builder = ChartBuilder::on(&root);
    builder.margin(10);
    if with_text {
        builder
            .caption(&options.title, (FONT_FAMILY, 30).into_font())
            .x_label_area_size(30)
            .y_label_area_size(40);
    }
    let mut chart = builder
        .build_cartesian_2d(x_range, lo..hi)
        .map_err(drawing_error)?;

    let labels = &data.labels;
    let category_name = |x: &f64| {
        let i = x.round();
        if (x - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < n {
            labels[i as usize].clone()
        } else {
            String::new()
        }
    };
    if with_text {
        chart
            .configure_mesh()
            .x_desc(&options.x_label)
            .y_desc(&options.y_label)
            .x_labels(n.clamp(1, MAX_X_LABELS))
            .x_label_formatter(&category_name)
            .draw()
            .map_err(drawing_error)?;
    }

    let points: Vec<(f64, f64)> = data
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();
    let main = to_rgb(color_for(0, 1));

    match options.graph_type {
        GraphType::Line => chart
            .draw_series(LineSeries::new(points.iter().copied(), main.stroke_width(2)))
            .map(|_| ()),
        GraphType::Bar => chart
            .draw_series(points.iter().enumerate().map(|(i, &(x, y))| {
                Rectangle::new(
                    [(x - 0.4, 0.0_f64.max(lo)), (x + 0.4, y)],
                    to_rgb(color_for(i, n)).filled(),
                )
            }))
            .map(|_| ()),
        GraphType::Scatter => chart
            .draw_series(
                points
                    .iter()
                    .enumerate()
                    .map(|(i, &p)| Circle::new(p, 5, to_rgb(color_for(i, n)).filled())),
            )
            .map(|_| ()),
        GraphType::Area => chart
            .draw_series(
                AreaSeries::new(points.iter().copied(), 0.0, main.mix(0.3).filled())
                    .border_style(main.stroke_width(2)),
            )
            .map(|_| ()),
    }
    .map_err(drawing_error)?;

    root.present().map_err(drawing_error)
}

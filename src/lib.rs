/*!
# Sheet Insights

Statistical analysis and pseudo-3D charting for the spreadsheets a dashboard
user uploads.

## Overview

An uploaded spreadsheet arrives as a small preview (a header row plus value
arrays, or an array of row objects). This crate normalizes that preview into an
immutable columnar table, checks its quality, summarizes its numeric columns,
correlates them pairwise, and draws interactive pie and column charts with a
color-matched legend that can be exported as one PNG.

## Architecture

### Analysis
- **table**: Normalized table, cell coercion (numbers, dates), row caps
- **quality**: Type inference, completeness, uniqueness, IQR outliers, recommendations
- **stats**: Mean, median, mode, sample standard deviation, quartiles, skewness, kurtosis
- **correlation**: Pearson r, strength and direction, significance via t-statistic
- **analysis**: The full path from table to report

### Charts
- **chart**: Category/value data and chart-type dispatch
- **view**: Rotate/zoom/tilt view-state reducer
- **color**: Deterministic HSL palette shared by charts and legends
- **scene**: Resolution-independent draw commands
- **pie** / **column**: Geometry of the two pseudo-3D projections
- **legend**: Legend grid and summary line
- **canvas**: Drawing-surface trait and the bitmap rasterizer
- **export**: Chart + legend composite PNG
- **graph**: Standard bar/line/scatter/area charts

### Persistence and I/O
- **saving**: Chart-save payload as JSON or gzip-compressed bincode
- **loader**: CSV and JSON input files
- **config**: Settings, environment overrides, font registration
- **app**: HTTP API (feature `web`)

## Design Highlights

- Every renderer is a pure function from data and view-state to a `Scene`;
  only `canvas` touches pixels
- Statistics failures are scoped: a bad column is skipped and reported, the rest
  of the batch still completes
- Identical inputs give byte-identical images
*/

pub mod analysis;
pub mod canvas;
pub mod chart;
pub mod color;
pub mod column;
pub mod config;
pub mod correlation;
pub mod error;
pub mod export;
pub mod graph;
pub mod legend;
pub mod loader;
pub mod pie;
pub mod quality;
pub mod saving;
pub mod scene;
pub mod stats;
pub mod table;
pub mod view;

#[cfg(feature = "web")]
pub mod app;

pub use analysis::{AnalysisOptions, AnalysisReport, analyze};
pub use chart::{ChartData, ChartType, render_scene};
pub use config::Settings;
pub use correlation::{CorrelationResult, correlate};
pub use error::{ConfigError, LoadError, PayloadError, RenderError, StatsError, TableError};
pub use export::{export_png, export_to_file};
pub use legend::LegendLayout;
pub use quality::{DataQualityReport, assess};
pub use saving::ChartSavePayload;
pub use scene::{CanvasSize, Scene};
pub use stats::{DescriptiveStats, describe};
pub use table::{CellValue, RowCap, Table, TableSource};
pub use view::{ChartKind, ChartViewState, ViewAction};

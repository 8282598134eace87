//! Integration tests for chart geometry, rasterization and export.

mod common;

use common::{categories, chart_data};
use sheet_insights::canvas::{MAX_PIXELS, encode_png, rasterize};
use sheet_insights::chart::render_scene;
use sheet_insights::column::{ColumnLayout, MAX_COLUMN_WIDTH, MIN_COLUMN_WIDTH, column_width};
use sheet_insights::error::RenderError;
use sheet_insights::export::{composite, export_dimensions, export_png, export_to_file};
use sheet_insights::legend::entries;
use sheet_insights::pie::{NO_DATA_MESSAGE, PieLayout};
use sheet_insights::scene::{CanvasSize, DrawCommand, Scene};
use sheet_insights::view::{ChartKind, ChartViewState, ViewAction};
use std::f64::consts::{FRAC_PI_2, TAU};

const SIZE: CanvasSize = CanvasSize::new(600, 400);

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ============================================================================
// PIE
// ============================================================================

#[test]
fn test_pie_slices_partition_the_circle() {
    let data = chart_data(&["A", "B", "C"], &[10.0, 10.0, 80.0]);
    let layout = PieLayout::compute(&data, &ChartViewState::default(), SIZE);

    let sweeps: Vec<f64> = layout.slices.iter().map(|s| s.sweep.to_degrees()).collect();
    assert!(close(sweeps[0], 36.0));
    assert!(close(sweeps[1], 36.0));
    assert!(close(sweeps[2], 288.0));
    assert!(close(layout.slices[0].start_angle, -FRAC_PI_2));
    assert!(close(layout.slices[2].end_angle(), -FRAC_PI_2 + TAU));

    let percentages: Vec<f64> = layout.slices.iter().map(|s| s.percentage).collect();
    assert!(close(percentages.iter().sum::<f64>(), 100.0));
    assert!(layout.slices.iter().all(|s| s.label_at.is_some()));
}

#[test]
fn test_pie_rotation_moves_the_start() {
    let data = chart_data(&["A", "B"], &[1.0, 1.0]);
    let view = ChartViewState::default().apply(ViewAction::RotateRight, ChartKind::Pie);
    let layout = PieLayout::compute(&data, &view, SIZE);
    assert!(close(layout.slices[0].start_angle, -FRAC_PI_2 + TAU / 12.0));
}

#[test]
fn test_pie_tilt_and_zoom_shape_the_ellipse() {
    let data = chart_data(&["A"], &[1.0]);
    let flat = PieLayout::compute(&data, &ChartViewState::default().apply(ViewAction::SetTilt(0.2), ChartKind::Pie), SIZE);
    let round = PieLayout::compute(&data, &ChartViewState::default().apply(ViewAction::SetTilt(1.0), ChartKind::Pie), SIZE);
    assert!(flat.radius_y < round.radius_y);
    assert!(flat.depth > round.depth);
    assert_eq!(round.radius_x, round.radius_y);

    let zoomed = PieLayout::compute(&data, &ChartViewState::default().apply(ViewAction::ZoomIn, ChartKind::Pie), SIZE);
    assert!(zoomed.radius_x > round.radius_x);
}

#[test]
fn test_pie_without_positive_total_shows_placeholder() {
    for values in [[0.0, 0.0], [-1.0, -5.0]] {
        let data = chart_data(&["A", "B"], &values);
        let scene = render_scene(ChartKind::Pie, &data, &ChartViewState::default(), SIZE);
        assert_eq!(scene.texts().collect::<Vec<_>>(), [NO_DATA_MESSAGE]);
    }
}

#[test]
fn test_narrow_slices_have_no_inline_label() {
    let data = chart_data(&["big", "tiny"], &[999.0, 1.0]);
    let layout = PieLayout::compute(&data, &ChartViewState::default(), SIZE);
    assert!(layout.slices[0].label_at.is_some());
    assert!(layout.slices[1].label_at.is_none());
}

#[test]
fn test_pie_scene_draws_walls_before_tops() {
    let data = chart_data(&["A", "B", "C"], &[3.0, 2.0, 1.0]);
    let layout = PieLayout::compute(&data, &ChartViewState::default(), SIZE);
    let scene = layout.scene();
    let first_top = scene
        .commands
        .iter()
        .position(|c| matches!(c, DrawCommand::FillPolygon { color, .. } if *color == layout.slices[0].color))
        .unwrap();
    let last_wall = scene
        .commands
        .iter()
        .rposition(|c| matches!(c, DrawCommand::FillPolygon { color, .. } if layout.slices.iter().any(|s| s.shadow == *color)))
        .unwrap();
    assert!(last_wall < first_top);
}

// ============================================================================
// COLUMNS
// ============================================================================

#[test]
fn test_column_width_is_bounded() {
    assert_eq!(column_width(520.0, 1), MAX_COLUMN_WIDTH);
    assert_eq!(column_width(520.0, 200), MIN_COLUMN_WIDTH);
    assert!(close(column_width(520.0, 10), 31.2));
}

#[test]
fn test_equal_values_sit_on_the_baseline() {
    let data = chart_data(&["A", "B", "C"], &[4.0, 4.0, 4.0]);
    let layout = ColumnLayout::compute(&data, &ChartViewState::default(), SIZE);
    assert!(layout.prisms.iter().all(|p| p.height == 0.0 && p.top == layout.baseline));
}

#[test]
fn test_columns_scale_between_min_and_max() {
    let data = chart_data(&["A", "B", "C"], &[10.0, 20.0, 30.0]);
    let layout = ColumnLayout::compute(&data, &ChartViewState::default(), SIZE);
    let heights: Vec<f64> = layout.prisms.iter().map(|p| p.height).collect();
    assert_eq!(heights[0], 0.0);
    assert!(close(heights[1] * 2.0, heights[2]));
    assert!(layout.prisms.windows(2).all(|w| w[0].x < w[1].x));
}

#[test]
fn test_columns_ignore_rotation() {
    let data = categories(5);
    let rotated = ChartViewState::default().replay([ViewAction::RotateLeft; 3], ChartKind::Column);
    assert_eq!(
        ColumnLayout::compute(&data, &ChartViewState::default(), SIZE),
        ColumnLayout::compute(&data, &rotated, SIZE)
    );
}

#[test]
fn test_empty_column_chart_shows_placeholder() {
    let data = chart_data(&[], &[]);
    let scene = render_scene(ChartKind::Column, &data, &ChartViewState::default(), SIZE);
    assert_eq!(scene.texts().collect::<Vec<_>>(), [NO_DATA_MESSAGE]);
}

// ============================================================================
// COLORS, RASTER, EXPORT
// ============================================================================

#[test]
fn test_legend_colors_match_the_chart() {
    let data = categories(7);
    let legend = entries(&data);
    let pie = PieLayout::compute(&data, &ChartViewState::default(), SIZE);
    let columns = ColumnLayout::compute(&data, &ChartViewState::default(), SIZE);
    for i in 0..7 {
        assert_eq!(legend[i].color, pie.slices[i].color);
        assert_eq!(legend[i].color, columns.prisms[i].front);
    }
}

#[test]
fn test_rasterize_is_deterministic() {
    let data = categories(6);
    let view = ChartViewState::default().replay([ViewAction::RotateRight, ViewAction::ZoomIn], ChartKind::Pie);
    let scene = render_scene(ChartKind::Pie, &data, &view, SIZE);
    let first = rasterize(&scene).unwrap();
    let second = rasterize(&scene).unwrap();
    assert_eq!(first.dimensions(), (600, 400));
    assert_eq!(first.as_raw(), second.as_raw());
    assert_eq!(encode_png(&first).unwrap(), encode_png(&second).unwrap());
}

#[test]
fn test_rasterize_paints_the_background() {
    let image = rasterize(&Scene::new(CanvasSize::new(4, 3))).unwrap();
    assert!(image.pixels().all(|p| p.0 == [255, 255, 255]));
}

#[test]
fn test_unavailable_render_target() {
    let empty = rasterize(&Scene::new(CanvasSize::new(0, 400)));
    assert!(matches!(empty, Err(RenderError::RenderTargetUnavailable { width: 0, .. })));

    let side = (MAX_PIXELS as f64).sqrt() as u32 + 1;
    let huge = rasterize(&Scene::new(CanvasSize::new(side, side)));
    assert!(matches!(huge, Err(RenderError::RenderTargetUnavailable { .. })));
}

#[test]
fn test_export_stacks_chart_over_legend() {
    let data = categories(10);
    let expected = export_dimensions(SIZE, data.len());
    assert_eq!(expected, CanvasSize::new(600, 400 + 3 * 24 + 24 + 24));

    let image = composite(ChartKind::Column, &data, &ChartViewState::default(), SIZE).unwrap();
    assert_eq!(image.dimensions(), (expected.width, expected.height));
}

#[test]
fn test_export_is_byte_identical_for_identical_inputs() {
    let data = categories(4);
    let view = ChartViewState::default();
    let a = export_png(ChartKind::Pie, &data, &view, SIZE).unwrap();
    let b = export_png(ChartKind::Pie, &data, &view, SIZE).unwrap();
    assert_eq!(a, b);
    assert_eq!(&a[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.png");
    export_to_file(&path, ChartKind::Pie, &categories(3), &ChartViewState::default(), SIZE).unwrap();

    let written = image::open(&path).unwrap();
    let expected = export_dimensions(SIZE, 3);
    assert_eq!((written.width(), written.height()), (expected.width, expected.height));
}

#[test]
fn test_failed_export_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.png");
    let result = export_to_file(&path, ChartKind::Pie, &categories(3), &ChartViewState::default(), CanvasSize::new(0, 0));
    assert!(result.is_err());
    assert!(!path.exists());
}

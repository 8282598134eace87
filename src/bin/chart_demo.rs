#![cfg(not(tarpaulin_include))]

use sheet_insights::chart::ChartData;
use sheet_insights::config::Settings;
use sheet_insights::export::export_to_file;
use sheet_insights::graph::{GraphOptions, GraphType, render_standard_chart};
use sheet_insights::view::{ChartKind, ChartViewState, ViewAction};

/// Writes one example of every chart into `chart_output/`.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load(None)?;
    settings.register_font()?;

    let output_dir = "chart_output";
    std::fs::create_dir_all(output_dir)?;

    let data = ChartData::new(
        ["North", "South", "East", "West", "Central", "Online", "Partners"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        vec![10.0, 25.0, 15.0, 30.0, 22.0, 40.0, 35.0],
    )?;

    let tilted = ChartViewState::default().replay(
        [ViewAction::RotateRight, ViewAction::ZoomIn, ViewAction::SetTilt(0.4)],
        ChartKind::Pie,
    );
    for (name, kind, view) in [
        ("pie", ChartKind::Pie, ChartViewState::default()),
        ("pie_rotated", ChartKind::Pie, tilted),
        ("column", ChartKind::Column, ChartViewState::default()),
    ] {
        let path = format!("{}/{}_chart.png", output_dir, name);
        export_to_file(&path, kind, &data, &view, settings.canvas)?;
        println!("Created {} chart at {}", name, path);
    }

    for graph_type in [GraphType::Line, GraphType::Bar, GraphType::Scatter, GraphType::Area] {
        let options = GraphOptions {
            title: format!("Example {:?} Graph", graph_type),
            x_label: "Region".to_string(),
            y_label: "Sales".to_string(),
            width: settings.canvas.width,
            height: settings.canvas.height,
            graph_type,
        };
        let path = format!("{}/{:?}_graph.png", output_dir, graph_type).to_lowercase();
        std::fs::write(&path, render_standard_chart(&data, &options)?)?;
        println!("Created {:?} graph at {}", graph_type, path);
    }

    Ok(())
}

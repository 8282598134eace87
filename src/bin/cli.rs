#![cfg(not(tarpaulin_include))]

use sheet_insights::analysis::{AnalysisOptions, analyze};
use sheet_insights::chart::ChartData;
use sheet_insights::config::Settings;
use sheet_insights::export::export_to_file;
use sheet_insights::loader::load_source;
use sheet_insights::table::{RowCap, Table};
use sheet_insights::view::{ChartKind, ChartViewState};
use std::env;

const USAGE: &str = "Usage:
  insights-cli analyze <file> [--full] [columns...]
  insights-cli export <file> <label_col> <value_col> <pie|column> <out.png>";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let settings = Settings::load(None)?;
    settings.register_font()?;

    match args.get(1).map(String::as_str) {
        Some("analyze") if args.len() >= 3 => {
            let full = args[3..].iter().any(|a| a == "--full");
            let columns: Vec<String> = args[3..]
                .iter()
                .filter(|a| a.as_str() != "--full")
                .cloned()
                .collect();

            let cap = if full { RowCap::Full } else { RowCap::Preview };
            let table = Table::from_source(&load_source(&args[2])?, cap.resolve(&settings.row_caps))?;
            let options = AnalysisOptions {
                columns: (!columns.is_empty()).then_some(columns),
            };
            let report = analyze(&table, &options);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Some("export") if args.len() == 7 => {
            let kind = match args[5].as_str() {
                "pie" => ChartKind::Pie,
                "column" => ChartKind::Column,
                other => {
                    eprintln!("Error: unknown chart kind {:?}\n{}", other, USAGE);
                    return Ok(());
                }
            };
            let table = Table::from_source(&load_source(&args[2])?, settings.row_caps.full)?;
            let Some(data) = ChartData::from_columns(&table, &args[3], &args[4]) else {
                eprintln!("Error: columns {:?} and {:?} not found", args[3], args[4]);
                return Ok(());
            };
            export_to_file(&args[6], kind, &data, &ChartViewState::default(), settings.canvas)?;
            println!("Wrote {} categories to {}", data.len(), args[6]);
        }
        _ => eprintln!("{}", USAGE),
    }

    Ok(())
}

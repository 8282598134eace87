#![cfg(not(tarpaulin_include))]

use sheet_insights::app;
use sheet_insights::config::Settings;
use std::env;
use std::path::PathBuf;

/// Main entry point for the analytics web service
///
/// Reads settings from the JSON file named by the first argument, if any, then
/// applies the `INSIGHTS_*` environment overrides and serves the API.
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref())?;
    if !settings.register_font()? {
        log::warn!("no label font configured, charts will render without text");
    }

    app::run(settings).await
}

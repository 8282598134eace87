//! Runtime settings for the service and the command-line tools.

use crate::canvas::FONT_FAMILY;
use crate::error::ConfigError;
use crate::scene::CanvasSize;
use crate::table::RowCaps;
use log::info;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const BIND_ENV: &str = "INSIGHTS_BIND";
pub const FONT_ENV: &str = "INSIGHTS_FONT";
pub const FULL_ROWS_ENV: &str = "INSIGHTS_FULL_ROWS";

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub bind_addr: String,
    pub row_caps: RowCaps,
    /// Chart area; the legend is laid out at the same width
    pub canvas: CanvasSize,
    /// TTF/OTF file used for every label
    pub font_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.to_string(),
            row_caps: RowCaps::default(),
            canvas: CanvasSize::default(),
            font_path: None,
        }
    }
}

impl Settings {
    /// Reads `path` when given, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match path {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => Settings::default(),
        };
        settings.with_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides looked up through `var`.
    pub fn with_overrides<F>(mut self, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = var(BIND_ENV) {
            self.bind_addr = bind;
        }
        if let Some(font) = var(FONT_ENV) {
            self.font_path = Some(PathBuf::from(font));
        }
        if let Some(rows) = var(FULL_ROWS_ENV) {
            self.row_caps.full = rows
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: FULL_ROWS_ENV.to_string(),
                    value: rows.clone(),
                })?;
        }
        Ok(self)
    }

    /// Registers the configured font for chart labels. Without one, charts
    /// render shapes only.
    pub fn register_font(&self) -> Result<bool, ConfigError> {
        match &self.font_path {
            Some(path) => {
                register_font(path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Makes the font at `path` the one every label is drawn with.
///
/// The bytes stay alive for the rest of the process, as the plotting
/// library's font registry requires.
pub fn register_font(path: &Path) -> Result<(), ConfigError> {
    let bytes: &'static [u8] = Box::leak(fs::read(path)?.into_boxed_slice());
    plotters::style::register_font(FONT_FAMILY, plotters::style::FontStyle::Normal, bytes)
        .map_err(|_| ConfigError::Font(format!("{} is not a usable font file", path.display())))?;
    info!("registered label font {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_the_preview_service() {
        let settings = Settings::default();
        assert_eq!(settings.bind_addr, "127.0.0.1:3000");
        assert_eq!(settings.row_caps.preview, 50);
        assert_eq!(settings.row_caps.full, 1000);
        assert_eq!(settings.canvas, CanvasSize::new(600, 400));
    }

    #[test]
    fn overrides_replace_file_values() {
        let vars: HashMap<&str, &str> = [(BIND_ENV, "0.0.0.0:8080"), (FULL_ROWS_ENV, "250")]
            .into_iter()
            .collect();
        let settings = Settings::default()
            .with_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.row_caps.full, 250);
        assert_eq!(settings.font_path, None);
    }

    #[test]
    fn bad_row_cap_is_rejected() {
        let result = Settings::default().with_overrides(|k| (k == FULL_ROWS_ENV).then(|| "many".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"bindAddr": "0.0.0.0:1"}"#).unwrap();
        assert_eq!(settings.bind_addr, "0.0.0.0:1");
        assert_eq!(settings.canvas, CanvasSize::default());
    }

    #[test]
    fn unreadable_font_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"not a font").unwrap();
        match register_font(&path) {
            Err(ConfigError::Font(message)) => assert!(message.contains("broken.ttf")),
            other => panic!("expected a font error, got {:?}", other.map(|_| ())),
        }
    }
}

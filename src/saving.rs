//! Chart-save payload handed to the dashboard persistence layer.
//!
//! The payload is stored either as camelCase JSON or as gzip-compressed
//! bincode. Reloading a payload reproduces exactly the chart it was saved from.

use bincode::{deserialize_from, serialize_into};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::chart::{ChartData, ChartType, render_scene};
use crate::error::{PayloadError, RenderError};
use crate::export;
use crate::scene::{CanvasSize, Scene};
use crate::table::Table;
use crate::view::{ChartKind, ChartViewState};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfiguration {
    pub x_axis: String,
    pub y_axis: String,
    #[serde(default)]
    pub z_axis: Option<String>,
    #[serde(default)]
    pub interactive_settings: ChartViewState,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSavePayload {
    pub title: String,
    pub chart_type: ChartType,
    pub data: ChartData,
    pub configuration: ChartConfiguration,
}

impl ChartSavePayload {
    /// Builds a payload by grouping `y_axis` values under `x_axis` labels.
    pub fn from_table(
        title: impl Into<String>,
        chart_type: ChartType,
        table: &Table,
        x_axis: &str,
        y_axis: &str,
        view: ChartViewState,
    ) -> Result<Self, PayloadError> {
        let data = ChartData::from_columns(table, x_axis, y_axis).ok_or_else(|| {
            PayloadError::Invalid(format!("table has no columns {x_axis:?} and {y_axis:?}"))
        })?;
        let view = match chart_type.kind() {
            Some(kind) => view.sanitized(kind),
            None => view,
        };
        Ok(Self {
            title: title.into(),
            chart_type,
            data,
            configuration: ChartConfiguration {
                x_axis: x_axis.to_string(),
                y_axis: y_axis.to_string(),
                z_axis: None,
                interactive_settings: view,
            },
        })
    }

    /// Checks the data and brings the view-state into range.
    pub fn validated(mut self) -> Result<Self, PayloadError> {
        self.data.validate()?;
        if let Some(kind) = self.chart_type.kind() {
            self.configuration.interactive_settings =
                self.configuration.interactive_settings.sanitized(kind);
        }
        Ok(self)
    }

    /// View-state in range for this chart type, whatever was assigned to
    /// `interactive_settings` directly.
    pub fn view(&self) -> ChartViewState {
        let view = self.configuration.interactive_settings;
        match self.chart_type.kind() {
            Some(kind) => view.sanitized(kind),
            None => view,
        }
    }

    fn kind(&self) -> Result<ChartKind, PayloadError> {
        self.chart_type.kind().ok_or_else(|| {
            PayloadError::Invalid(format!(
                "{:?} charts are drawn by the standard chart adapter",
                self.chart_type
            ))
        })
    }

    /// Scene of the pseudo-3D chart this payload describes.
    pub fn scene(&self, size: CanvasSize) -> Result<Scene, PayloadError> {
        Ok(render_scene(self.kind()?, &self.data, &self.view(), size))
    }

    /// Composite chart + legend PNG.
    pub fn export_png(&self, size: CanvasSize) -> Result<Vec<u8>, RenderError> {
        let kind = self
            .kind()
            .map_err(|e| RenderError::Drawing(e.to_string()))?;
        export::export_png(kind, &self.data, &self.view(), size)
    }

    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, PayloadError> {
        serde_json::from_str::<Self>(text)?.validated()
    }

    /// Gzip-compressed bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PayloadError> {
        let mut buffer = Vec::new();
        {
            let encoder = GzEncoder::new(&mut buffer, Compression::default());
            let mut writer = BufWriter::new(encoder);
            serialize_into(&mut writer, self)?;
            writer
                .into_inner()
                .map_err(|e| PayloadError::Io(e.into_error()))?
                .finish()?;
        }
        Ok(buffer)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PayloadError> {
        let mut reader = BufReader::new(GzDecoder::new(bytes));
        let payload: Self = deserialize_from(&mut reader)?;
        payload.validated()
    }
}

pub fn save_payload(payload: &ChartSavePayload, filename: impl AsRef<Path>) -> Result<(), PayloadError> {
    let bytes = payload.to_bytes()?;
    let mut file = File::create(filename)?;
    file.write_all(&bytes)?;
    Ok(())
}

pub fn load_payload(filename: impl AsRef<Path>) -> Result<ChartSavePayload, PayloadError> {
    let mut bytes = Vec::new();
    File::open(filename)?.read_to_end(&mut bytes)?;
    ChartSavePayload::from_bytes(&bytes)
}

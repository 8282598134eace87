//! Normalized, immutable tabular data.
//!
//! Upload previews arrive either as a header row plus value arrays or as an
//! array of row objects. Both shapes are normalized here into one columnar
//! [`Table`] in which every row carries every declared column; absent cells are
//! explicit [`CellValue::Null`].

use crate::error::TableError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

lazy_static! {
    static ref PLAIN_NUMBER_REGEX: Regex =
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap();
    static ref GROUPED_NUMBER_REGEX: Regex =
        Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d+)?$").unwrap();
}

/// Rows kept for a quick preview.
pub const PREVIEW_ROWS: usize = 50;

/// Rows kept for a full analysis.
pub const FULL_ROWS: usize = 1000;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// A single scalar cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Normalizes a raw JSON value. `null` and blank strings become `Null`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Number(n) => match n.as_f64() {
                Some(f) => CellValue::Number(f),
                None => CellValue::Text(n.to_string()),
            },
            Value::String(s) if s.trim().is_empty() => CellValue::Null,
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Bool(b) => CellValue::Text(b.to_string()),
            other => CellValue::Text(other.to_string()),
        }
    }

    /// Normalizes a raw text field, as read from a CSV file.
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            CellValue::Null
        } else {
            CellValue::Text(text.to_string())
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric coercion used by every statistic.
    ///
    /// Numbers pass through, text is parsed as a plain or thousands-grouped
    /// decimal literal. Anything non-finite is rejected.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            CellValue::Null => return None,
            CellValue::Number(n) => *n,
            CellValue::Text(s) => parse_number(s)?,
        };
        value.is_finite().then_some(value)
    }

    /// Whether the cell reads as a calendar date or timestamp.
    pub fn is_date(&self) -> bool {
        match self {
            CellValue::Text(s) => parse_date(s).is_some(),
            _ => false,
        }
    }

    /// Text used when the cell serves as a category label.
    pub fn label(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Text(s) => Some(s.clone()),
        }
    }
}

/// Parses a decimal literal, accepting `1,234.5` style grouping.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if PLAIN_NUMBER_REGEX.is_match(trimmed) {
        trimmed.parse::<f64>().ok()
    } else if GROUPED_NUMBER_REGEX.is_match(trimmed) {
        trimmed.replace(',', "").parse::<f64>().ok()
    } else {
        None
    }
}

/// Parses common date and timestamp spellings into a naive timestamp.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Formats a number the way labels and summaries show it: integers without a
/// fractional part, everything else with at most two decimals.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Upper bound on the rows a request may process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum RowCap {
    #[default]
    Preview,
    Full,
    Rows(usize),
}

/// Concrete row counts behind the named caps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCaps {
    pub preview: usize,
    pub full: usize,
}

impl Default for RowCaps {
    fn default() -> Self {
        Self {
            preview: PREVIEW_ROWS,
            full: FULL_ROWS,
        }
    }
}

impl RowCap {
    pub fn resolve(self, caps: &RowCaps) -> usize {
        match self {
            RowCap::Preview => caps.preview,
            RowCap::Full => caps.full,
            RowCap::Rows(n) => n,
        }
    }
}

/// Table description as delivered by the upload subsystem.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableSource {
    /// Header row plus ordered value arrays
    Grid {
        headers: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    /// Row objects; the column list is discovered from keys when absent
    Records {
        #[serde(default)]
        columns: Option<Vec<String>>,
        rows: Vec<Map<String, Value>>,
    },
}

/// Immutable columnar table.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    cells: Vec<Vec<CellValue>>,
    row_count: usize,
    index: HashMap<String, usize>,
}

/// Borrowed view of one table row.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    table: &'a Table,
    row: usize,
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        self.table.cell(self.row, column)
    }

    pub fn index(&self) -> usize {
        self.row
    }
}

impl Table {
    /// Builds a table from already-normalized rows. Short rows are padded with
    /// nulls, extra trailing cells are dropped.
    pub fn from_rows(
        columns: Vec<String>,
        rows: Vec<Vec<CellValue>>,
        cap: usize,
    ) -> Result<Self, TableError> {
        let index = build_index(&columns)?;
        let width = columns.len();
        let kept = rows.len().min(cap);
        if rows.len() > kept {
            debug!("row cap {} applied, dropping {} rows", cap, rows.len() - kept);
        }

        let mut cells = vec![Vec::with_capacity(kept); width];
        for row in rows.into_iter().take(kept) {
            let mut values = row.into_iter();
            for column in cells.iter_mut() {
                column.push(values.next().unwrap_or(CellValue::Null));
            }
        }

        Ok(Table {
            columns,
            cells,
            row_count: kept,
            index,
        })
    }

    /// Header row plus value arrays.
    pub fn from_grid(headers: &[String], rows: &[Vec<Value>], cap: usize) -> Result<Self, TableError> {
        let normalized = rows
            .iter()
            .take(cap)
            .map(|row| row.iter().map(CellValue::from_json).collect())
            .collect();
        Self::from_rows(headers.to_vec(), normalized, cap)
    }

    /// Row objects with a known column list, or keys discovered in order of
    /// first appearance.
    pub fn from_records(
        columns: Option<&[String]>,
        rows: &[Map<String, Value>],
        cap: usize,
    ) -> Result<Self, TableError> {
        let kept = &rows[..rows.len().min(cap)];
        let columns = match columns {
            Some(columns) => columns.to_vec(),
            None => {
                let mut discovered: Vec<String> = Vec::new();
                for row in kept {
                    for key in row.keys() {
                        if !discovered.iter().any(|c| c == key) {
                            discovered.push(key.clone());
                        }
                    }
                }
                discovered
            }
        };

        let normalized = kept
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|c| row.get(c).map(CellValue::from_json).unwrap_or(CellValue::Null))
                    .collect()
            })
            .collect();
        Self::from_rows(columns, normalized, cap)
    }

    pub fn from_source(source: &TableSource, cap: usize) -> Result<Self, TableError> {
        match source {
            TableSource::Grid { headers, rows } => Self::from_grid(headers, rows, cap),
            TableSource::Records { columns, rows } => {
                Self::from_records(columns.as_deref(), rows, cap)
            }
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All cells of a column in row order.
    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.index.get(name).map(|&i| self.cells[i].as_slice())
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.column(column).and_then(|cells| cells.get(row))
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.row_count).map(move |row| Row { table: self, row })
    }

    /// Finite numeric values of a column in row order.
    pub fn numeric_values(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)
            .map(|cells| cells.iter().filter_map(CellValue::as_number).collect())
    }
}

fn build_index(columns: &[String]) -> Result<HashMap<String, usize>, TableError> {
    let mut index = HashMap::with_capacity(columns.len());
    for (i, name) in columns.iter().enumerate() {
        if index.insert(name.clone(), i).is_some() {
            return Err(TableError::DuplicateColumn(name.clone()));
        }
    }
    Ok(index)
}

use crate::error::LoadError;
use crate::table::TableSource;
use log::debug;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a table source from a CSV file
///
/// The first record is the header row. Every field is kept as text; numeric
/// coercion happens later, when statistics read the column.
///
/// # Arguments
/// * `filepath` - Path to the CSV file to load
///
/// # Returns
/// * `Result<TableSource, LoadError>` - A grid source or an error
///
/// # Examples
/// ```no_run
/// use sheet_insights::loader::from_csv;
///
/// match from_csv("data.csv") {
///     Ok(source) => println!("loaded {:?}", source),
///     Err(e) => eprintln!("Error loading CSV: {}", e),
/// }
/// ```
pub fn from_csv(filepath: impl AsRef<Path>) -> Result<TableSource, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(filepath)?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| Value::String(field.to_string()))
                .collect(),
        );
    }
    debug!("read {} CSV rows with {} columns", rows.len(), headers.len());
    Ok(TableSource::Grid { headers, rows })
}

/// Load a table source from a JSON file
///
/// Accepts either shape the upload subsystem produces (`{"headers", "rows"}`
/// or `{"columns", "rows"}`), or a bare array of row objects.
///
/// # Arguments
/// * `filepath` - Path to the JSON file to load
///
/// # Returns
/// * `Result<TableSource, LoadError>` - The parsed source or an error
pub fn from_json(filepath: impl AsRef<Path>) -> Result<TableSource, LoadError> {
    let reader = BufReader::new(File::open(filepath)?);
    let value: Value = serde_json::from_reader(reader)?;
    match value {
        Value::Array(items) => {
            let rows = items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Ok(map),
                    other => Err(serde::de::Error::custom(format!(
                        "expected a row object, found {}",
                        other
                    ))),
                })
                .collect::<Result<Vec<Map<String, Value>>, serde_json::Error>>()?;
            Ok(TableSource::Records { columns: None, rows })
        }
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Detect file type and load appropriate format
///
/// # Arguments
/// * `filepath` - Path to the file to load
///
/// # Returns
/// * `Result<TableSource, LoadError>` - The loaded source or an error
///
/// # Examples
/// ```no_run
/// use sheet_insights::loader::load_source;
///
/// match load_source("data.csv") {
///     Ok(_) => println!("Successfully loaded table"),
///     Err(e) => eprintln!("Error loading file: {}", e),
/// }
/// ```
pub fn load_source(filepath: impl AsRef<Path>) -> Result<TableSource, LoadError> {
    let path = filepath.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("csv") => from_csv(path),
        Some("json") => from_json(path),
        Some(ext) => Err(LoadError::UnsupportedExtension(ext.to_string())),
        None => Err(LoadError::MissingExtension),
    }
}

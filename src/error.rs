use thiserror::Error;

/// Structural failures while normalizing an upload preview into a [`crate::table::Table`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// Two columns share the same name
    #[error("duplicate column name: {0:?}")]
    DuplicateColumn(String),

    /// The source could not be interpreted as a table at all
    #[error("invalid table source: {0}")]
    InvalidSource(String),
}

/// Scoped statistics failures.
///
/// These never abort a batch: the engines return them in a `skipped` list next
/// to whatever did succeed.
#[derive(Error, Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StatsError {
    /// Column is missing from the table or has no valid numeric value
    #[error("column {column:?} has no valid numeric values")]
    InsufficientData { column: String },

    /// Fewer than two complete rows for a pair of columns
    #[error("columns {column_a:?} and {column_b:?} share fewer than two numeric rows")]
    InsufficientPairData { column_a: String, column_b: String },
}

/// Failures while turning a scene into pixels or an exported file.
#[derive(Error, Debug)]
pub enum RenderError {
    /// No drawing surface can be created for the requested size
    #[error("no drawing surface available for a {width}x{height} target")]
    RenderTargetUnavailable { width: u32, height: u32 },

    /// The drawing backend rejected a primitive
    #[error("drawing failed: {0}")]
    Drawing(String),

    /// PNG encoding failed
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while storing or reading back a chart-save payload.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("invalid chart payload: {0}")]
    Invalid(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary encoding error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while reading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("cannot register font: {0}")]
    Font(String),
}

/// Failures while loading an input file into a table source.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("file has no extension")]
    MissingExtension,
}

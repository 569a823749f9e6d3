use std::path::PathBuf;

use thiserror::Error;

pub type TemplatinatorResult<T> = Result<T, TemplatinatorError>;

#[derive(Error, Debug)]
pub enum TemplatinatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid cell range '{range}': {reason}")]
    InvalidRange { range: String, reason: String },

    /// A placeholder expression failed to compile.
    #[error("Template compile error in {location}: {message}")]
    Compile { location: String, message: String },

    /// A compiled expression failed against a row's bindings.
    #[error("Render error in {location} (data row {row}): {message}")]
    Render {
        location: String,
        row: usize,
        message: String,
    },

    #[error("Workbook error ({path}): {message}")]
    Workbook { path: PathBuf, message: String },

    /// The selected data range holds a header at most; there is nothing to render.
    #[error("No header or not enough data in range '{range}' to populate template")]
    NoData { range: String },

    #[error("Columns {first:?} and {second:?} both normalize to variable '{variable}'")]
    ColumnCollision {
        variable: String,
        first: String,
        second: String,
    },

    #[error("Scaffold error: {0}")]
    Scaffold(String),
}

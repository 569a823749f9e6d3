//! `template-data.json` loading and validation.
//!
//! Keys follow the original PascalCase layout:
//!
//! ```json
//! {
//!   "Input": "template.xlsx",
//!   "OutputTemplate": "{{Name}}.xlsx",
//!   "OutputDir": "out",
//!   "Data": { "File": "data.xlsx", "Range": "A1:C50" },
//!   "Areas": [ { "Range": "B2:D10" } ]
//! }
//! ```
//!
//! snake_case aliases (`output_template`, `output_dir`, ...) are accepted as
//! well, which reads more naturally in YAML.

use crate::error::{TemplatinatorError, TemplatinatorResult};
use crate::range::CellRange;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "template-data.json";

/// Location of the data sheet.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DataSource {
    #[serde(default, alias = "file")]
    pub file: String,
    #[serde(default, alias = "range")]
    pub range: String,
}

/// One template region scanned for placeholder cells.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Area {
    #[serde(alias = "range")]
    pub range: String,
}

/// Raw configuration document, as written by the user.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateDataConfig {
    #[serde(default, alias = "input")]
    pub input: String,
    #[serde(default, alias = "output_template")]
    pub output_template: String,
    #[serde(default, alias = "output_dir")]
    pub output_dir: String,
    #[serde(default, alias = "data")]
    pub data: DataSource,
    #[serde(default, alias = "areas")]
    pub areas: Vec<Area>,
    /// Fail instead of warning when two headers normalize to the same variable.
    #[serde(default, alias = "strict_columns")]
    pub strict_columns: bool,
}

/// Outcome of validating a config document.
#[derive(Debug)]
pub enum ConfigCheck {
    Ready(Settings),
    /// A usage problem reported to the user without running anything.
    Incomplete(&'static str),
}

pub const NO_AREAS_MESSAGE: &str = "No template areas defined. Define areas and re-run the program.";
pub const NO_INPUT_OUTPUT_MESSAGE: &str =
    "No input or output file defined. Check the config and re-run the program.";

/// Validated settings with paths resolved and ranges parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: PathBuf,
    pub output_template: String,
    pub output_dir: PathBuf,
    pub data_file: PathBuf,
    pub data_range: CellRange,
    pub areas: Vec<CellRange>,
    pub strict_columns: bool,
}

impl TemplateDataConfig {
    /// Load a config document; the format follows the file extension.
    pub fn load(path: &Path) -> TemplatinatorResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TemplatinatorError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Self::from_json(&content),
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Err(TemplatinatorError::Config(format!(
                "Unsupported config format '{}' (expected .json, .yaml or .yml)",
                path.display()
            ))),
        }
    }

    pub fn from_json(content: &str) -> TemplatinatorResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> TemplatinatorResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Validate and resolve relative paths against `base_dir`.
    pub fn check(&self, base_dir: &Path) -> TemplatinatorResult<ConfigCheck> {
        if self.areas.is_empty() {
            return Ok(ConfigCheck::Incomplete(NO_AREAS_MESSAGE));
        }
        if self.input.trim().is_empty() || self.output_template.trim().is_empty() {
            return Ok(ConfigCheck::Incomplete(NO_INPUT_OUTPUT_MESSAGE));
        }

        if self.output_dir.trim().is_empty() {
            return Err(TemplatinatorError::Config(
                "OutputDir is required".to_string(),
            ));
        }
        if self.data.file.trim().is_empty() || self.data.range.trim().is_empty() {
            return Err(TemplatinatorError::Config(
                "Data.File and Data.Range are required".to_string(),
            ));
        }

        let areas = self
            .areas
            .iter()
            .map(|area| CellRange::parse(&area.range))
            .collect::<TemplatinatorResult<Vec<_>>>()?;

        Ok(ConfigCheck::Ready(Settings {
            input: resolve(base_dir, &self.input),
            output_template: self.output_template.clone(),
            output_dir: resolve(base_dir, &self.output_dir),
            data_file: resolve(base_dir, &self.data.file),
            data_range: CellRange::parse(&self.data.range)?,
            areas,
            strict_columns: self.strict_columns,
        }))
    }
}

fn resolve(base_dir: &Path, value: &str) -> PathBuf {
    let path = Path::new(value.trim());
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Directory that relative config paths are resolved against.
pub fn base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

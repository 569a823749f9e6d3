//! Templatinator - batch spreadsheet generator
//!
//! Takes an Excel template whose cells hold `{{placeholder}}` expressions, a
//! data sheet with one record per row, and writes one filled-in workbook per
//! record. The output file name is itself a placeholder expression.
//!
//! # Pipeline
//!
//! 1. Every cell of the configured template areas is compiled once
//!    ([`template::TemplateCache`]).
//! 2. The data range is read and its headers normalized into variable names
//!    ([`data::DataSet`]).
//! 3. Each row is rendered into the template and saved under its rendered
//!    file name ([`render::OutputWriter`]).
//!
//! # Example
//!
//! ```no_run
//! use templatinator::config::{ConfigCheck, TemplateDataConfig};
//! use templatinator::pipeline::generate;
//! use std::path::Path;
//!
//! let config = TemplateDataConfig::load(Path::new("template-data.json"))?;
//! if let ConfigCheck::Ready(settings) = config.check(Path::new("."))? {
//!     let summary = generate(&settings, false)?;
//!     println!("Wrote {} workbooks", summary.artifacts.len());
//! }
//! # Ok::<(), templatinator::error::TemplatinatorError>(())
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod excel;
pub mod pipeline;
pub mod range;
pub mod render;
pub mod scaffold;
pub mod template;
pub mod value;

// Re-export commonly used types
pub use error::{TemplatinatorError, TemplatinatorResult};
pub use range::{CellRange, CellRef};
pub use value::{CellValue, RowBindings};

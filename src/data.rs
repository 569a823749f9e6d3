//! Data sheet → per-row variable bindings.
//!
//! Column headers become variable names by replacing every character that is
//! not a word character (Unicode letter, digit, `_`) with `_`, one for one:
//! `"First Name"` → `First_Name`, `"Unit #"` → `Unit__`.
//!
//! Each variable is also reachable through its lower-case spelling
//! (`{{first_name}}`) unless that spelling is itself a variable, or the
//! lower-case alias of a column further left.

use crate::error::{TemplatinatorError, TemplatinatorResult};
use crate::excel::{DataImporter, RawTable};
use crate::range::CellRange;
use crate::value::{CellValue, RowBindings};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::warn;

fn non_word() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^\w]").expect("non-word pattern"))
}

/// Variable name used in placeholders for a column header.
pub fn normalize_column_name(header: &str) -> String {
    non_word().replace_all(header, "_").into_owned()
}

/// A data column that feeds a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBinding {
    pub variable: String,
    pub header: String,
    /// Position within the selected range, 0-based.
    pub index: usize,
}

/// Normalized variable name ↔ original column header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    by_variable: BTreeMap<String, ColumnBinding>,
    /// lower-case alias → variable
    aliases: BTreeMap<String, String>,
}

impl ColumnMap {
    /// Map every header to its variable name.
    ///
    /// When two headers share a variable name the later column wins, with a
    /// warning, unless `strict` is set, in which case it is an error.
    pub fn from_headers(headers: &[String], strict: bool) -> TemplatinatorResult<Self> {
        let mut by_variable = BTreeMap::new();

        for (index, header) in headers.iter().enumerate() {
            let variable = normalize_column_name(header);
            let binding = ColumnBinding {
                variable: variable.clone(),
                header: header.clone(),
                index,
            };

            if let Some(previous) = by_variable.insert(variable.clone(), binding) {
                if strict {
                    return Err(TemplatinatorError::ColumnCollision {
                        variable,
                        first: previous.header,
                        second: header.clone(),
                    });
                }
                warn!(
                    variable = %variable,
                    replaced = %previous.header,
                    by = %header,
                    "column names collide after normalization; later column wins"
                );
            }
        }

        let mut columns: Vec<&ColumnBinding> = by_variable.values().collect();
        columns.sort_by_key(|column| column.index);

        let mut aliases = BTreeMap::new();
        for column in columns {
            let alias = column.variable.to_lowercase();
            if alias != column.variable && !by_variable.contains_key(&alias) {
                aliases
                    .entry(alias)
                    .or_insert_with(|| column.variable.clone());
            }
        }

        Ok(Self {
            by_variable,
            aliases,
        })
    }

    /// Original header behind a variable name or its lower-case alias.
    pub fn header(&self, variable: &str) -> Option<&str> {
        let variable = self
            .aliases
            .get(variable)
            .map(String::as_str)
            .unwrap_or(variable);
        self.by_variable.get(variable).map(|b| b.header.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_variable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_variable.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnBinding> {
        self.by_variable.values()
    }

    /// Bindings for one data row.
    pub fn bind(&self, row: &[CellValue]) -> RowBindings {
        let value = |column: &ColumnBinding| {
            row.get(column.index)
                .cloned()
                .unwrap_or(CellValue::Blank)
        };

        let mut bindings: RowBindings = self
            .by_variable
            .values()
            .map(|column| (column.variable.clone(), value(column)))
            .collect();
        for (alias, variable) in &self.aliases {
            bindings.insert(alias.clone(), value(&self.by_variable[variable]));
        }
        bindings
    }
}

/// Normalized data: the column mapping and one binding set per data row.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    pub columns: ColumnMap,
    pub rows: Vec<RowBindings>,
}

impl DataSet {
    pub fn from_table(table: &RawTable, strict: bool) -> TemplatinatorResult<Self> {
        let columns = ColumnMap::from_headers(&table.headers, strict)?;
        let rows = table.rows.iter().map(|row| columns.bind(row)).collect();
        Ok(Self { columns, rows })
    }

    /// Load and normalize `range` of the data workbook's first sheet.
    ///
    /// Fails with [`TemplatinatorError::NoData`] when the range has no data rows.
    pub fn load(path: &Path, range: &CellRange, strict: bool) -> TemplatinatorResult<Self> {
        let table = DataImporter::new(path).import(range)?;
        Self::from_table(&table, strict)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

//! Data sheet importer - any calamine-readable workbook → raw table

use crate::error::{TemplatinatorError, TemplatinatorResult};
use crate::range::CellRange;
use crate::value::CellValue;
use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use chrono::Timelike;
use std::path::{Path, PathBuf};

/// Header row plus data rows, exactly as selected from the data sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Reads the configured range of the first worksheet of a data workbook
pub struct DataImporter {
    path: PathBuf,
}

impl DataImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import `range` of the first worksheet.
    ///
    /// The first row of the range is the header. Returns
    /// [`TemplatinatorError::NoData`] when the range, clipped to the sheet's
    /// used area, holds one row or less.
    pub fn import(&self, range: &CellRange) -> TemplatinatorResult<RawTable> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|e| TemplatinatorError::Workbook {
            path: self.path.clone(),
            message: format!("Failed to open data file: {}", e),
        })?;

        let sheet = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| TemplatinatorError::Workbook {
                path: self.path.clone(),
                message: "Data file has no worksheets".to_string(),
            })?
            .map_err(|e| TemplatinatorError::Workbook {
                path: self.path.clone(),
                message: format!("Failed to read first worksheet: {}", e),
            })?;

        read_table(&sheet, range)
    }
}

/// Extract `range` (1-based) from a calamine sheet.
pub fn read_table(sheet: &Range<Data>, range: &CellRange) -> TemplatinatorResult<RawTable> {
    let no_data = || TemplatinatorError::NoData {
        range: range.to_string(),
    };

    if range.row_count() <= 1 {
        return Err(no_data());
    }

    // calamine positions are 0-based and absolute
    let used_end_row = match sheet.end() {
        Some((row, _)) if !sheet.is_empty() => row + 1,
        _ => return Err(no_data()),
    };
    let last_row = range.end.row.min(used_end_row);
    if last_row <= range.start.row {
        return Err(no_data());
    }

    let cell = |row: u32, col: u32| -> Data {
        sheet
            .get_value((row - 1, col - 1))
            .cloned()
            .unwrap_or(Data::Empty)
    };
    let columns = range.start.column..=range.end.column;

    let headers = columns
        .clone()
        .enumerate()
        .map(|(idx, col)| header_name(&cell(range.start.row, col), idx))
        .collect();

    let rows = (range.start.row + 1..=last_row)
        .map(|row| {
            columns
                .clone()
                .map(|col| convert_value(&cell(row, col)))
                .collect::<Vec<_>>()
        })
        .filter(|values| !values.iter().all(CellValue::is_blank))
        .collect();

    Ok(RawTable { headers, rows })
}

fn header_name(cell: &Data, idx: usize) -> String {
    match cell {
        Data::Empty | Data::Error(_) => format!("col_{}", idx),
        other => {
            let name = convert_value(other).to_string();
            if name.is_empty() {
                format!("col_{}", idx)
            } else {
                name
            }
        }
    }
}

/// Convert a calamine cell to a [`CellValue`]. Error cells become blank.
pub fn convert_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Blank,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(dt) => match cell.as_datetime() {
            Some(datetime) => {
                let text = if datetime.time().num_seconds_from_midnight() == 0 {
                    datetime.format("%Y-%m-%d").to_string()
                } else {
                    datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
                };
                CellValue::Text(text)
            }
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

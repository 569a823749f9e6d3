//! Plain workbook exporter, used to scaffold sample projects

use crate::error::{TemplatinatorError, TemplatinatorResult};
use crate::value::CellValue;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Writes a single-sheet workbook from a grid of values, row 0 at A1.
pub struct SheetExporter {
    rows: Vec<Vec<CellValue>>,
    bold_first_row: bool,
    column_width: Option<f64>,
}

impl SheetExporter {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            rows,
            bold_first_row: false,
            column_width: None,
        }
    }

    /// Render the first row bold (data sheet headers).
    pub fn with_header(mut self) -> Self {
        self.bold_first_row = true;
        self
    }

    pub fn with_column_width(mut self, width: f64) -> Self {
        self.column_width = Some(width);
        self
    }

    pub fn export(&self, output_path: &Path) -> TemplatinatorResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        if let Some(column_width) = self.column_width {
            for col in 0..width {
                worksheet
                    .set_column_width(col as u16, column_width)
                    .map_err(|e| {
                        TemplatinatorError::Scaffold(format!("Failed to set column width: {}", e))
                    })?;
            }
        }

        let header = Format::new().set_bold();
        for (row_idx, row) in self.rows.iter().enumerate() {
            let format = (row_idx == 0 && self.bold_first_row).then_some(&header);
            for (col_idx, value) in row.iter().enumerate() {
                Self::write_cell(worksheet, row_idx as u32, col_idx as u16, value, format)?;
            }
        }

        workbook.save(output_path).map_err(|e| TemplatinatorError::Workbook {
            path: output_path.to_path_buf(),
            message: format!("Failed to save Excel file: {}", e),
        })?;

        Ok(())
    }

    fn write_cell(
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &CellValue,
        format: Option<&Format>,
    ) -> TemplatinatorResult<()> {
        let result = match (value, format) {
            (CellValue::Text(s), Some(f)) => worksheet.write_string_with_format(row, col, s, f),
            (CellValue::Text(s), None) => worksheet.write_string(row, col, s),
            (CellValue::Number(n), Some(f)) => worksheet.write_number_with_format(row, col, *n, f),
            (CellValue::Number(n), None) => worksheet.write_number(row, col, *n),
            (CellValue::Boolean(b), Some(f)) => {
                worksheet.write_boolean_with_format(row, col, *b, f)
            }
            (CellValue::Boolean(b), None) => worksheet.write_boolean(row, col, *b),
            (CellValue::Blank, _) => return Ok(()),
        };

        result
            .map(|_| ())
            .map_err(|e| TemplatinatorError::Scaffold(format!("Failed to write cell: {}", e)))
    }
}

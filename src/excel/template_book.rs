//! Template workbook handle - open an .xlsx, read and overwrite cells on its
//! first worksheet, save the whole workbook under a new name.

use crate::error::{TemplatinatorError, TemplatinatorResult};
use crate::range::CellRef;
use std::path::{Path, PathBuf};
use umya_spreadsheet::{Spreadsheet, Worksheet};

pub struct TemplateWorkbook {
    path: PathBuf,
    book: Spreadsheet,
}

impl TemplateWorkbook {
    /// Open an existing template workbook.
    pub fn open<P: AsRef<Path>>(path: P) -> TemplatinatorResult<Self> {
        let path = path.as_ref().to_path_buf();
        let book = umya_spreadsheet::reader::xlsx::read(&path).map_err(|e| {
            TemplatinatorError::Workbook {
                path: path.clone(),
                message: format!("Failed to open template: {}", e),
            }
        })?;

        let workbook = Self { path, book };
        workbook.sheet()?;
        Ok(workbook)
    }

    /// Wrap an in-memory workbook. `path` is only used in error messages.
    pub fn from_spreadsheet<P: AsRef<Path>>(path: P, book: Spreadsheet) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            book,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sheet(&self) -> TemplatinatorResult<&Worksheet> {
        self.book.get_sheet(&0).ok_or_else(|| no_sheet(&self.path))
    }

    fn sheet_mut(&mut self) -> TemplatinatorResult<&mut Worksheet> {
        let path = &self.path;
        self.book.get_sheet_mut(&0).ok_or_else(|| no_sheet(path))
    }

    /// Text of a cell on the template sheet; empty when the cell does not exist.
    pub fn read_text(&self, cell: CellRef) -> TemplatinatorResult<String> {
        let address = cell.address();
        Ok(self.sheet()?.get_value(address.as_str()))
    }

    /// Overwrite a cell with literal text.
    pub fn write_text(&mut self, cell: CellRef, text: &str) -> TemplatinatorResult<()> {
        let address = cell.address();
        self.sheet_mut()?
            .get_cell_mut(address.as_str())
            .set_value_string(text);
        Ok(())
    }

    /// Save the workbook, in its current state, to `path`.
    pub fn save_as(&self, path: &Path) -> TemplatinatorResult<()> {
        umya_spreadsheet::writer::xlsx::write(&self.book, path).map_err(|e| {
            TemplatinatorError::Workbook {
                path: path.to_path_buf(),
                message: format!("Failed to save workbook: {}", e),
            }
        })
    }
}

fn no_sheet(path: &Path) -> TemplatinatorError {
    TemplatinatorError::Workbook {
        path: path.to_path_buf(),
        message: "Template has no worksheets".to_string(),
    }
}

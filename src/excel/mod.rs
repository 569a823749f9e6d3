//! Spreadsheet I/O
//!
//! - Template: .xlsx opened, mutated in place, saved as new files (umya-spreadsheet)
//! - Data: first worksheet of any calamine-readable workbook (.xlsx, .xls, .ods)
//! - Export: plain value grids written with rust_xlsxwriter (sample projects)

mod exporter;
pub mod importer;
mod template_book;

pub use exporter::SheetExporter;
pub use importer::{DataImporter, RawTable};
pub use template_book::TemplateWorkbook;

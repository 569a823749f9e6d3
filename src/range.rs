//! A1-style cell references and rectangular ranges.
//!
//! Rows and columns are 1-based, matching what users type in a config file
//! (`B2:D10`). Conversion to the 0-based coordinates used by the data
//! reader happens at the call site.

use crate::error::{TemplatinatorError, TemplatinatorResult};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Largest column in an .xlsx sheet (XFD).
pub const MAX_COLUMN: u32 = 16_384;
/// Largest row in an .xlsx sheet.
pub const MAX_ROW: u32 = 1_048_576;

fn cell_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\$?([A-Za-z]{1,3})\$?([0-9]{1,7})$").expect("cell reference pattern")
    })
}

/// Convert a column index to Excel column letters (1→A, 26→Z, 27→AA).
pub fn column_letters(mut column: u32) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let remainder = (column - 1) % 26;
        letters.push((b'A' + remainder as u8) as char);
        column = (column - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Convert Excel column letters to a column index (A→1, Z→26, AA→27).
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    letters.chars().try_fold(0u32, |acc, c| {
        let c = c.to_ascii_uppercase();
        if !c.is_ascii_uppercase() {
            return None;
        }
        Some(acc * 26 + (c as u32 - 'A' as u32 + 1))
    })
}

/// A single cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: u32,
    pub column: u32,
}

impl CellRef {
    pub fn new(column: u32, row: u32) -> Self {
        Self { row, column }
    }

    /// The A1 address of this cell, without `$` anchors.
    pub fn address(&self) -> String {
        format!("{}{}", column_letters(self.column), self.row)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address())
    }
}

impl FromStr for CellRef {
    type Err = TemplatinatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| TemplatinatorError::InvalidRange {
            range: s.to_string(),
            reason: reason.to_string(),
        };

        let caps = cell_pattern()
            .captures(s.trim())
            .ok_or_else(|| invalid("expected an A1-style cell reference"))?;

        let column = column_index(&caps[1]).ok_or_else(|| invalid("bad column letters"))?;
        let row: u32 = caps[2].parse().map_err(|_| invalid("bad row number"))?;

        if column == 0 || column > MAX_COLUMN {
            return Err(invalid("column out of bounds"));
        }
        if row == 0 || row > MAX_ROW {
            return Err(invalid("row out of bounds"));
        }

        Ok(CellRef { row, column })
    }
}

/// A rectangular block of cells, normalized so `start` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    pub fn new(a: CellRef, b: CellRef) -> Self {
        Self {
            start: CellRef::new(a.column.min(b.column), a.row.min(b.row)),
            end: CellRef::new(a.column.max(b.column), a.row.max(b.row)),
        }
    }

    /// Parse `A1:D10`, or a single cell `C3` as a 1x1 range.
    pub fn parse(expr: &str) -> TemplatinatorResult<Self> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(TemplatinatorError::InvalidRange {
                range: expr.to_string(),
                reason: "range is empty".to_string(),
            });
        }

        // Sheet-qualified ranges (Sheet1!A1:B2) are not supported: templates are single-sheet.
        if expr.contains('!') {
            return Err(TemplatinatorError::InvalidRange {
                range: expr.to_string(),
                reason: "sheet-qualified ranges are not supported".to_string(),
            });
        }

        let mut parts = expr.split(':');
        let first = parts.next().unwrap_or_default();
        let second = parts.next();
        if parts.next().is_some() {
            return Err(TemplatinatorError::InvalidRange {
                range: expr.to_string(),
                reason: "too many ':' separators".to_string(),
            });
        }

        let a: CellRef = first.parse().map_err(|_| TemplatinatorError::InvalidRange {
            range: expr.to_string(),
            reason: format!("'{}' is not a cell reference", first),
        })?;
        let b = match second {
            Some(s) => s.parse().map_err(|_| TemplatinatorError::InvalidRange {
                range: expr.to_string(),
                reason: format!("'{}' is not a cell reference", s),
            })?,
            None => a,
        };

        Ok(Self::new(a, b))
    }

    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    pub fn column_count(&self) -> u32 {
        self.end.column - self.start.column + 1
    }

    /// Cells in row-major order: left to right, then top to bottom.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> {
        let (start, end) = (self.start, self.end);
        (start.row..=end.row)
            .flat_map(move |row| (start.column..=end.column).map(move |col| CellRef::new(col, row)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

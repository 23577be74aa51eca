use crate::error::{Result, SheetError};
use crate::sheet::RawSheet;

/// An ordered collection of raw sheets (workbook tabs)
#[derive(Debug, Clone, Default)]
pub struct Book {
    sheets: Vec<RawSheet>,
}

impl Book {
    /// Create a new empty book
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book from already-read sheets
    #[must_use]
    pub fn from_sheets(sheets: Vec<RawSheet>) -> Self {
        Book { sheets }
    }

    /// Append a sheet at the end
    pub fn push(&mut self, sheet: RawSheet) {
        self.sheets.push(sheet);
    }

    /// Get the number of sheets
    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Sheet names in tab order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(RawSheet::name).collect()
    }

    /// Take ownership of the sheets at two distinct tab positions
    ///
    /// # Errors
    ///
    /// Returns `SheetError::SameSheetIndex` when both positions are equal and
    /// `SheetError::SheetIndexOutOfRange` if the book has fewer tabs.
    pub fn into_pair(mut self, first: usize, second: usize) -> Result<(RawSheet, RawSheet)> {
        if first == second {
            return Err(SheetError::SameSheetIndex { index: first });
        }
        let count = self.sheets.len();
        for index in [first, second] {
            if index >= count {
                return Err(SheetError::SheetIndexOutOfRange { index, count });
            }
        }
        let a = std::mem::take(&mut self.sheets[first]);
        let b = std::mem::take(&mut self.sheets[second]);
        Ok((a, b))
    }
}

use crate::book::Book;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::RawSheet;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel stores dates as days since 1899-12-30
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        // Formula errors (#N/A, #DIV/0!) carry no data
        Data::Error(_) => CellValue::Null,
    }
}

fn workbook_error(path: &Path, e: impl std::fmt::Display) -> SheetError {
    SheetError::Workbook(format!("{}: {e}", path.display()))
}

impl Book {
    /// Load every tab of a spreadsheet (xlsx, xlsm, xlsb, xls or ods).
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Workbook` if the file cannot be opened or a tab
    /// cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, e))?;

        let sheet_names = workbook.sheet_names();
        let mut book = Book::new();
        for sheet_name in sheet_names {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| workbook_error(path, e))?;

            // calamine starts the range at the first used cell
            let row_offset = range.start().map_or(0, |(row, _)| row as usize);
            let data: Vec<Vec<CellValue>> = range
                .rows()
                .map(|row| row.iter().map(data_to_cell_value).collect())
                .collect();

            tracing::debug!(
                path = %path.display(),
                sheet = %sheet_name,
                rows = data.len(),
                row_offset,
                "read sheet"
            );
            book.push(RawSheet::from_data(&sheet_name, data).with_row_offset(row_offset));
        }

        Ok(book)
    }
}

use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::table::Table;

/// Default prefix identifying the real header row of a PiN/Severity tab.
pub const DEFAULT_HEADER_PREFIX: &str = "Admin 0";

/// One workbook tab as read from disk: a grid of untyped cells with no
/// header assumed (row-major storage).
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    name: String,
    data: Vec<Vec<CellValue>>,
    /// Spreadsheet rows above `data[0]` that the reader skipped
    row_offset: usize,
}

impl RawSheet {
    /// Create an empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        RawSheet {
            name: name.to_string(),
            data: Vec::new(),
            row_offset: 0,
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(name: &str, data: Vec<Vec<T>>) -> Self {
        let data = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        RawSheet {
            name: name.to_string(),
            data,
            row_offset: 0,
        }
    }

    /// Mark `data[0]` as spreadsheet row `offset + 1`.
    ///
    /// Readers that trim leading blank rows set this so reported source rows
    /// match what a spreadsheet shows.
    #[must_use]
    pub fn with_row_offset(mut self, offset: usize) -> Self {
        self.row_offset = offset;
        self
    }

    /// Spreadsheet rows above the first stored row
    #[must_use]
    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Check if the sheet is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get internal data reference
    #[must_use]
    pub fn data(&self) -> &[Vec<CellValue>] {
        &self.data
    }

    /// Index of the first row whose first cell starts with `prefix`
    #[must_use]
    pub fn find_header_row(&self, prefix: &str) -> Option<usize> {
        self.data.iter().position(|row| {
            row.first()
                .is_some_and(|cell| cell.as_str().starts_with(prefix))
        })
    }

    /// Re-base the sheet on its real header row.
    ///
    /// Rows above the header are preamble and are discarded. Blank header
    /// cells are named `Unnamed: {index}`; data rows are padded or cut to
    /// the header width.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::HeaderNotFound` when no row matches and
    /// `SheetError::AmbiguousColumn` when the header repeats a name.
    pub fn into_table(self, prefix: &str) -> Result<Table> {
        let header_idx =
            self.find_header_row(prefix)
                .ok_or_else(|| SheetError::HeaderNotFound {
                    sheet: self.name.clone(),
                    prefix: prefix.to_string(),
                })?;

        let mut rows = self.data.into_iter().skip(header_idx);
        let header = rows.next().unwrap_or_default();
        let columns: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(i, cell)| match cell.as_trimmed() {
                Some(_) => cell.as_str(),
                None => format!("Unnamed: {i}"),
            })
            .collect();

        // Source rows are reported 1-based, as a spreadsheet shows them
        let header_row = self.row_offset + header_idx + 1;
        let mut table = Table::new(&self.name, columns, header_row)?;
        let width = table.col_count();
        for mut row in rows {
            row.resize(width, CellValue::Null);
            table.push_row(row)?;
        }

        tracing::debug!(
            sheet = %self.name,
            header_row,
            columns = width,
            rows = table.row_count(),
            "located header row"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preamble_sheet() -> RawSheet {
        RawSheet::from_data(
            "PiN",
            vec![
                vec![CellValue::from("Humanitarian Needs Overview 2024"), CellValue::Null],
                vec![CellValue::Null, CellValue::Null],
                vec![CellValue::from("Admin 0"), CellValue::from("Admin 1")],
                vec![CellValue::from("Country X"), CellValue::from("Region Y")],
            ],
        )
    }

    #[test]
    fn test_find_header_row() {
        assert_eq!(preamble_sheet().find_header_row(DEFAULT_HEADER_PREFIX), Some(2));
    }

    #[test]
    fn test_into_table_drops_preamble() {
        let table = preamble_sheet().into_table(DEFAULT_HEADER_PREFIX).unwrap();
        assert_eq!(table.columns(), &["Admin 0".to_string(), "Admin 1".to_string()]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.header_row(), 3);
        assert_eq!(table.get(0, "Admin 1"), Some(&CellValue::from("Region Y")));
    }

    #[test]
    fn test_header_prefix_match_is_prefix() {
        let sheet = RawSheet::from_data(
            "PiN",
            vec![
                vec!["Note: Admin 0 below", "x"],
                vec!["Admin 0 Name", "Admin 0 P-Code"],
                vec!["A", "AF"],
            ],
        );
        let table = sheet.into_table(DEFAULT_HEADER_PREFIX).unwrap();
        assert_eq!(table.columns()[0], "Admin 0 Name");
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_first_matching_row_wins() {
        let sheet = RawSheet::from_data(
            "PiN",
            vec![vec!["Admin 0", "A"], vec!["Admin 0", "B"], vec!["x", "y"]],
        );
        let table = sheet.into_table(DEFAULT_HEADER_PREFIX).unwrap();
        assert_eq!(table.columns()[1], "A");
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_header_not_found() {
        let sheet = RawSheet::from_data("Severity", vec![vec!["Country", "Region"]]);
        let err = sheet.into_table(DEFAULT_HEADER_PREFIX).unwrap_err();
        assert!(matches!(err, SheetError::HeaderNotFound { ref sheet, .. } if sheet == "Severity"));
    }

    #[test]
    fn test_duplicate_header_is_ambiguous() {
        let sheet = RawSheet::from_data(
            "PiN",
            vec![vec!["title"], vec!["Admin 0", "ISO3", "ISO3"]],
        );
        let err = sheet.into_table(DEFAULT_HEADER_PREFIX).unwrap_err();
        assert!(matches!(
            err,
            SheetError::AmbiguousColumn { ref column, row: 2, .. } if column == "ISO3"
        ));
    }

    #[test]
    fn test_blank_header_cells_are_unnamed() {
        let sheet = RawSheet::from_data(
            "PiN",
            vec![
                vec![CellValue::from("Admin 0"), CellValue::Null, CellValue::Null],
                vec![CellValue::from("X"), CellValue::Int(1), CellValue::Int(2)],
            ],
        );
        let table = sheet.into_table(DEFAULT_HEADER_PREFIX).unwrap();
        assert_eq!(table.columns()[1], "Unnamed: 1");
        assert_eq!(table.columns()[2], "Unnamed: 2");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let sheet = RawSheet::from_data(
            "PiN",
            vec![
                vec![CellValue::from("Admin 0"), CellValue::from("ISO3")],
                vec![CellValue::from("X")],
            ],
        );
        let table = sheet.into_table(DEFAULT_HEADER_PREFIX).unwrap();
        assert_eq!(table.get(0, "ISO3"), Some(&CellValue::Null));
    }
}

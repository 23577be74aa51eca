use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use std::collections::HashMap;

static NULL_CELL: CellValue = CellValue::Null;

/// A header-named table: unique column names plus row-major typed cells.
///
/// Every row has exactly one cell per column. The table remembers the sheet
/// it came from and the 1-based source row of its header so that errors and
/// logs can point back at the spreadsheet.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    column_index: HashMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
    header_row: usize,
}

/// Borrowed view of one table row with by-name access.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl Row<'_> {
    /// Position of the row among the table's data rows
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell under `column`, or the missing marker when the column is absent
    #[must_use]
    pub fn get(&self, column: &str) -> &CellValue {
        self.table.get(self.index, column).unwrap_or(&NULL_CELL)
    }

    /// Cells in column order
    #[must_use]
    pub fn cells(&self) -> &[CellValue] {
        &self.table.rows[self.index]
    }
}

impl Table {
    /// Create an empty table with the given columns.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::AmbiguousColumn` if a name appears twice.
    pub fn new(name: &str, columns: Vec<String>, header_row: usize) -> Result<Self> {
        let mut column_index = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if column_index.insert(column.clone(), i).is_some() {
                return Err(SheetError::AmbiguousColumn {
                    sheet: name.to_string(),
                    column: column.clone(),
                    row: header_row,
                });
            }
        }

        Ok(Table {
            name: name.to_string(),
            columns,
            column_index,
            rows: Vec::new(),
            header_row,
        })
    }

    /// Build a table from column names and row data, header on row 1
    pub fn from_data<T: Into<CellValue>>(
        name: &str,
        columns: &[&str],
        rows: Vec<Vec<T>>,
    ) -> Result<Self> {
        let mut table = Table::new(name, columns.iter().map(|c| c.to_string()).collect(), 1)?;
        for row in rows {
            table.push_row(row.into_iter().map(Into::into).collect())?;
        }
        Ok(table)
    }

    /// Name of the sheet this table came from
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names in order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 1-based source row of the header
    #[must_use]
    pub fn header_row(&self) -> usize {
        self.header_row
    }

    /// 1-based source row of data row `index`
    #[must_use]
    pub fn source_row(&self, index: usize) -> usize {
        self.header_row + 1 + index
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index.contains_key(name)
    }

    /// Position of a column by name
    #[must_use]
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.column_index.get(name).copied()
    }

    pub(crate) fn column_position_or_err(&self, name: &str) -> Result<usize> {
        self.column_position(name)
            .ok_or_else(|| SheetError::ColumnNotFound {
                sheet: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Get a cell by row index and column name
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_position(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Get a row view by index
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        (index < self.rows.len()).then_some(Row { table: self, index })
    }

    /// Iterate over row views
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.rows.len()).map(move |index| Row { table: self, index })
    }

    /// Append a data row.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::LengthMismatch` if the row width differs from the
    /// column count.
    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(SheetError::LengthMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append a column computed from each row.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::DuplicateColumn` if the name is taken.
    pub fn add_column_with<F>(&mut self, name: &str, mut f: F) -> Result<()>
    where
        F: FnMut(Row<'_>) -> CellValue,
    {
        if self.has_column(name) {
            return Err(SheetError::DuplicateColumn {
                sheet: self.name.clone(),
                column: name.to_string(),
            });
        }
        let values: Vec<CellValue> = self.rows().map(&mut f).collect();
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        self.column_index.insert(name.to_string(), self.columns.len());
        self.columns.push(name.to_string());
        Ok(())
    }

    /// Apply a function to every cell of one column
    pub fn column_map<F>(&mut self, name: &str, mut f: F) -> Result<()>
    where
        F: FnMut(usize, &mut CellValue),
    {
        let col = self.column_position_or_err(name)?;
        for (i, row) in self.rows.iter_mut().enumerate() {
            f(i, &mut row[col]);
        }
        Ok(())
    }

    /// Fail with `MissingRequiredColumn` on the first absent name
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        match names.iter().find(|name| !self.has_column(name)) {
            Some(missing) => Err(SheetError::MissingRequiredColumn {
                sheet: self.name.clone(),
                column: (*missing).to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Keep only the columns matching `keep`, preserving their order
    #[must_use]
    pub fn retain_columns<F>(mut self, keep: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let kept: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, name)| keep(name))
            .map(|(i, _)| i)
            .collect();

        for row in &mut self.rows {
            let mut cells = std::mem::take(row);
            *row = kept.iter().map(|&i| std::mem::take(&mut cells[i])).collect();
        }
        self.columns = kept.iter().map(|&i| self.columns[i].clone()).collect();
        self.rebuild_column_index();
        self
    }

    fn rebuild_column_index(&mut self) {
        self.column_index = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
    }

    pub(crate) fn data(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub(crate) fn data_mut(&mut self) -> &mut Vec<Vec<CellValue>> {
        &mut self.rows
    }

    pub(crate) fn push_column_name(&mut self, name: &str) -> Result<()> {
        if self.has_column(name) {
            return Err(SheetError::DuplicateColumn {
                sheet: self.name.clone(),
                column: name.to_string(),
            });
        }
        self.column_index.insert(name.to_string(), self.columns.len());
        self.columns.push(name.to_string());
        Ok(())
    }
}

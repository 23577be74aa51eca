//! Numeric coercion that never fails: bad cells become the missing marker.

use crate::cell::CellValue;
use crate::table::Table;
use indexmap::IndexMap;

/// Cells that could not be read as numbers, per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoercionReport {
    pub skipped: IndexMap<String, usize>,
}

impl CoercionReport {
    /// Total number of cells mapped to missing
    #[must_use]
    pub fn total(&self) -> usize {
        self.skipped.values().sum()
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: CoercionReport) {
        for (column, count) in other.skipped {
            *self.skipped.entry(column).or_default() += count;
        }
    }
}

impl Table {
    /// Convert the named columns to numbers in place.
    ///
    /// Numbers pass through, numeric strings are parsed, anything else
    /// becomes `CellValue::Null`. Columns that do not exist are ignored.
    /// Already-missing cells are not counted as skipped.
    pub fn coerce_numeric(&mut self, columns: &[&str]) -> CoercionReport {
        let mut report = CoercionReport::default();
        let sheet = self.name().to_string();
        let header_row = self.header_row();

        for &column in columns {
            let mut skipped = 0usize;
            let result = self.column_map(column, |i, cell| {
                if cell.is_blank() {
                    *cell = CellValue::Null;
                    return;
                }
                match cell.to_numeric() {
                    Some(number) => *cell = number,
                    None => {
                        tracing::debug!(
                            sheet = %sheet,
                            row = header_row + 1 + i,
                            column,
                            value = %cell,
                            "coercion skipped: not a number"
                        );
                        *cell = CellValue::Null;
                        skipped += 1;
                    }
                }
            });
            if result.is_err() {
                continue;
            }
            if skipped > 0 {
                tracing::warn!(
                    sheet = %sheet,
                    column,
                    cells = skipped,
                    "non-numeric cells set to null"
                );
                report.skipped.insert(column.to_string(), skipped);
            }
        }

        report
    }
}

//! Join key derivation from the administrative code columns.

use crate::columns::{ADMIN2_PCODE, ADMIN3_PCODE, MERGE_KEY};
use crate::error::PipelineResult;
use pinsev_sheet::{CellValue, Row, Table};

/// Join key for one row: the trimmed Admin 3 P-Code when non-blank, else the
/// trimmed Admin 2 P-Code, else missing.
#[must_use]
pub fn merge_key(row: Row<'_>) -> CellValue {
    row.get(ADMIN3_PCODE)
        .as_trimmed()
        .or_else(|| row.get(ADMIN2_PCODE).as_trimmed())
        .map_or(CellValue::Null, CellValue::String)
}

/// Append the `merge_key` column, returning how many rows have no key.
///
/// Rows without a key are kept; they simply never match in the join.
pub fn add_merge_key(table: &mut Table) -> PipelineResult<usize> {
    table.add_column_with(MERGE_KEY, merge_key)?;

    let missing: Vec<usize> = table
        .rows()
        .filter(|row| row.get(MERGE_KEY).is_null())
        .map(|row| table.source_row(row.index()))
        .collect();
    if !missing.is_empty() {
        tracing::warn!(
            sheet = %table.name(),
            rows = ?missing,
            "rows without an Admin 3 or Admin 2 P-Code"
        );
    }
    Ok(missing.len())
}

//! Left outer join of two tables on a shared key column.

use crate::cell::CellValue;
use crate::error::Result;
use crate::table::Table;
use std::collections::HashMap;

/// A right-hand column carried into the joined table under a new name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinColumn {
    pub source: String,
    pub target: String,
}

impl JoinColumn {
    #[must_use]
    pub fn new(source: &str, target: &str) -> Self {
        JoinColumn {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    /// Carry the column over under its own name
    #[must_use]
    pub fn same(name: &str) -> Self {
        Self::new(name, name)
    }
}

/// Outcome of a left join.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinReport {
    /// Left rows with at least one right match
    pub matched: usize,
    /// Left rows with no match (including rows with a missing key)
    pub unmatched: usize,
    /// Keys matching more than one right row, in first-seen order
    pub ambiguous: Vec<String>,
    /// Right rows whose key no left row referenced; they are dropped
    pub right_only: usize,
}

impl Table {
    /// Left outer join on `key`, which must exist in both tables.
    ///
    /// Every left row is kept exactly once. A missing or blank key never
    /// matches. When several right rows share a key, the first one in sheet
    /// order wins and the key is listed in [`JoinReport::ambiguous`].
    ///
    /// # Errors
    ///
    /// Returns `SheetError::ColumnNotFound` if the key or a source column is
    /// absent, and `SheetError::DuplicateColumn` if a target name collides
    /// with a left column.
    pub fn left_join(
        mut self,
        right: &Table,
        key: &str,
        columns: &[JoinColumn],
    ) -> Result<(Table, JoinReport)> {
        let left_key = self.column_position_or_err(key)?;
        let right_key = right.column_position_or_err(key)?;
        let sources: Vec<usize> = columns
            .iter()
            .map(|c| right.column_position_or_err(&c.source))
            .collect::<Result<_>>()?;
        for column in columns {
            self.push_column_name(&column.target)?;
        }

        // key -> every right row index carrying it, in sheet order
        let mut right_map: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, row) in right.data().iter().enumerate() {
            if let Some(k) = row[right_key].as_trimmed() {
                right_map.entry(k).or_default().push(i);
            }
        }

        let mut report = JoinReport::default();
        let mut referenced: Vec<bool> = vec![false; right.row_count()];
        let sheet = self.name().to_string();

        for row in self.data_mut().iter_mut() {
            let hit = row[left_key]
                .as_trimmed()
                .and_then(|k| right_map.get(&k).map(|rows| (k, rows)));

            match hit {
                Some((k, rows)) => {
                    for &r in rows {
                        referenced[r] = true;
                    }
                    if rows.len() > 1 && !report.ambiguous.contains(&k) {
                        tracing::warn!(
                            sheet = %sheet,
                            right = %right.name(),
                            key = %k,
                            candidates = rows.len(),
                            "join key matches several rows, using the first"
                        );
                        report.ambiguous.push(k);
                    }
                    let right_row = &right.data()[rows[0]];
                    row.extend(sources.iter().map(|&c| right_row[c].clone()));
                    report.matched += 1;
                }
                None => {
                    row.extend(std::iter::repeat(CellValue::Null).take(sources.len()));
                    report.unmatched += 1;
                }
            }
        }

        report.right_only = right
            .data()
            .iter()
            .zip(&referenced)
            .filter(|(row, seen)| !**seen && !row[right_key].is_blank())
            .count();

        tracing::info!(
            left = %sheet,
            right = %right.name(),
            matched = report.matched,
            unmatched = report.unmatched,
            ambiguous = report.ambiguous.len(),
            right_only = report.right_only,
            "joined sheets"
        );
        Ok((self, report))
    }
}

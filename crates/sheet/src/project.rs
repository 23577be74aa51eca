//! Column projection: keep prefixed columns plus an explicit allow-list.

use crate::error::Result;
use crate::table::Table;

/// Which columns survive into the working table.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    /// Any column starting with this prefix is kept (e.g. `"Admin"`)
    pub prefix: String,
    /// Exact column names that are kept when present
    pub allow: Vec<String>,
    /// Columns that must exist; subset of what the later stages read
    pub required: Vec<String>,
}

impl Projection {
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Projection {
            prefix: prefix.to_string(),
            ..Default::default()
        }
    }

    /// Add an optional allow-listed column
    #[must_use]
    pub fn allow<S: Into<String>>(mut self, column: S) -> Self {
        self.allow.push(column.into());
        self
    }

    /// Add several optional allow-listed columns
    #[must_use]
    pub fn allow_all<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Add an allow-listed column that must be present
    #[must_use]
    pub fn require<S: Into<String>>(mut self, column: S) -> Self {
        let column = column.into();
        self.allow.push(column.clone());
        self.required.push(column);
        self
    }

    fn keeps(&self, column: &str) -> bool {
        (!self.prefix.is_empty() && column.starts_with(&self.prefix))
            || self.allow.iter().any(|c| c == column)
    }
}

impl Table {
    /// Restrict the table to the projection, preserving column order.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::MissingRequiredColumn` naming the sheet and the
    /// first required column that is absent.
    pub fn project(self, projection: &Projection) -> Result<Table> {
        let required: Vec<&str> = projection.required.iter().map(String::as_str).collect();
        self.require_columns(&required)?;

        let before = self.col_count();
        let table = self.retain_columns(|name| projection.keeps(name));
        tracing::debug!(
            sheet = %table.name(),
            kept = table.col_count(),
            dropped = before - table.col_count(),
            "projected columns"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellValue, SheetError};

    fn wide() -> Table {
        Table::from_data(
            "PiN",
            &[
                "Admin 0",
                "Notes",
                "Admin 1 P-Code",
                "ISO3",
                "Population",
                "Final PiN",
                "Health",
                "Unnamed: 7",
            ],
            vec![vec![
                CellValue::from("X"),
                CellValue::from("remark"),
                CellValue::from("X01"),
                CellValue::from("XYZ"),
                CellValue::Int(10),
                CellValue::Int(5),
                CellValue::Int(1),
                CellValue::Null,
            ]],
        )
        .unwrap()
    }

    fn pin_projection() -> Projection {
        Projection::new("Admin")
            .require("ISO3")
            .require("Population")
            .require("Final PiN")
            .allow_all(["Health", "WASH"])
    }

    #[test]
    fn test_project_keeps_prefix_and_allow_list() {
        let table = wide().project(&pin_projection()).unwrap();
        assert_eq!(
            table.columns(),
            &[
                "Admin 0".to_string(),
                "Admin 1 P-Code".to_string(),
                "ISO3".to_string(),
                "Population".to_string(),
                "Final PiN".to_string(),
                "Health".to_string(),
            ]
        );
        assert_eq!(table.get(0, "Health"), Some(&CellValue::Int(1)));
    }

    #[test]
    fn test_optional_allow_list_columns_may_be_absent() {
        let table = wide().project(&pin_projection()).unwrap();
        assert!(!table.has_column("WASH"));
    }

    #[test]
    fn test_project_missing_required() {
        let projection = pin_projection().require("Final Severity");
        let err = wide().project(&projection).unwrap_err();
        assert!(matches!(
            err,
            SheetError::MissingRequiredColumn { ref column, .. } if column == "Final Severity"
        ));
    }
}

//! Sheet/Table module for pinsev
//!
//! Turns workbook tabs into strongly-typed tables: a [`RawSheet`] is the
//! untyped grid read from disk, a [`Table`] is the same data re-based on its
//! real header row, with unique column names and explicit missing values.
//!
//! # Examples
//!
//! ## Locating the header below a preamble
//!
//! ```
//! use pinsev_sheet::{RawSheet, DEFAULT_HEADER_PREFIX};
//!
//! let raw = RawSheet::from_data("PiN", vec![
//!     vec!["Humanitarian Needs Overview", ""],
//!     vec!["Admin 0", "Population"],
//!     vec!["Country X", "1000"],
//! ]);
//!
//! let table = raw.into_table(DEFAULT_HEADER_PREFIX).unwrap();
//! assert_eq!(table.columns(), &["Admin 0".to_string(), "Population".to_string()]);
//! assert_eq!(table.row_count(), 1);
//! ```
//!
//! ## Projection, coercion and joining
//!
//! ```
//! use pinsev_sheet::{CellValue, JoinColumn, Projection, Table};
//!
//! let mut pin = Table::from_data("PiN", &["key", "Population", "Notes"], vec![
//!     vec!["A", "N/A", "x"],
//!     vec!["B", "20", "y"],
//! ]).unwrap()
//!     .project(&Projection::new("key").require("Population"))
//!     .unwrap();
//! let report = pin.coerce_numeric(&["Population"]);
//! assert_eq!(report.total(), 1);
//!
//! let severity = Table::from_data("Severity", &["key", "Final Severity"], vec![
//!     vec![CellValue::from("B"), CellValue::Int(3)],
//! ]).unwrap();
//!
//! let (joined, join) = pin.left_join(&severity, "key", &[JoinColumn::same("Final Severity")]).unwrap();
//! assert_eq!(joined.row_count(), 2);
//! assert_eq!(join.matched, 1);
//! ```

mod book;
mod cell;
mod coerce;
mod error;
mod join;
mod project;
mod sheet;
mod table;
mod xlsx;

/// Re-export book type.
pub use book::Book;
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export coercion report.
pub use coerce::CoercionReport;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export join types.
pub use join::{JoinColumn, JoinReport};
/// Re-export projection options.
pub use project::Projection;
/// Re-export raw sheet type.
pub use sheet::{RawSheet, DEFAULT_HEADER_PREFIX};
/// Re-export table types.
pub use table::{Row, Table};

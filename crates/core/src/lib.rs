//! # pinsev-core
//!
//! Joins a humanitarian "People in Need" sheet with its "Severity" sheet and
//! reshapes the result into one JSON record per administrative unit, with
//! per-sector metrics nested under `sectors`.
//!
//! This crate provides:
//! - Reference data and configuration ([`PipelineConfig`])
//! - Merge-key derivation, region lookup and the PiN ratio
//! - The sector reshaper and the [`Record`] model
//! - JSON output ([`emit`])
//! - The [`Pipeline`] that runs the stages in order
//!
//! ```
//! use pinsev_core::{Pipeline, PipelineConfig};
//! use pinsev_sheet::RawSheet;
//!
//! let pin = RawSheet::from_data("PiN", vec![
//!     vec!["Admin 0", "Admin 2 P-Code", "ISO3", "Population", "Final PiN", "Health"],
//!     vec!["Country X", "X01", "XYZ", "1000", "250", "100"],
//! ]);
//! let severity = RawSheet::from_data("Severity", vec![
//!     vec!["Admin 0", "Admin 2 P-Code", "Final Severity", "Health"],
//!     vec!["Country X", "X01", "3", "4"],
//! ]);
//!
//! let output = Pipeline::new(PipelineConfig::default()).unwrap().run(pin, severity).unwrap();
//! let record = &output.records[0];
//! assert_eq!(record.pin_percentage, Some(0.25));
//! assert_eq!(record.sectors["Health"].severity, Some(4.0));
//! ```

/// Column names read or produced by the pipeline.
pub mod columns;
/// Configuration and reference data.
pub mod config;
/// Region and PiN ratio columns.
pub mod derive;
/// JSON output.
pub mod emit;
/// Error types and result aliases.
pub mod error;
/// Join key derivation.
pub mod merge_key;
/// Stage orchestration.
pub mod pipeline;
/// Output record model.
pub mod record;
/// Sector reshaping.
pub mod reshape;

pub use config::{PipelineConfig, DEFAULT_SECTORS};
pub use emit::{save_records, to_json_string, write_records};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{Pipeline, PipelineOutput, PipelineReport};
pub use record::{Record, SectorMetrics};
pub use reshape::SectorColumns;

//! Column names read or produced by the pipeline.

pub const ISO3: &str = "ISO3";
pub const POPULATION: &str = "Population";
pub const FINAL_PIN: &str = "Final PiN";
pub const FINAL_SEVERITY: &str = "Final Severity";
pub const ADMIN3_PCODE: &str = "Admin 3 P-Code";
pub const ADMIN2_PCODE: &str = "Admin 2 P-Code";

/// Derived columns
pub const REGION: &str = "Region";
pub const PIN_PERCENTAGE: &str = "PiN_percentage";
pub const MERGE_KEY: &str = "merge_key";

/// Name a Severity-side sector column takes in the joined table, so it can
/// never be confused with the PiN-side column of the same sector.
#[must_use]
pub fn severity_column(sector: &str) -> String {
    format!("severity::{sector}")
}

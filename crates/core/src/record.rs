//! Output record model.

use indexmap::IndexMap;
use pinsev_sheet::CellValue;
use serde::Serialize;

/// People in need and severity for one sector of one administrative unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SectorMetrics {
    pub pin: Option<f64>,
    pub severity: Option<f64>,
}

/// One administrative unit, serialized as a flat JSON object with the
/// sector metrics nested under `sectors`.
///
/// Missing values are `None` / `CellValue::Null` and serialize as `null`;
/// no key is ever omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Admin-prefixed columns in sheet order
    #[serde(flatten)]
    pub admin: IndexMap<String, CellValue>,
    #[serde(rename = "ISO3")]
    pub iso3: Option<String>,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Population")]
    pub population: Option<f64>,
    #[serde(rename = "Final PiN")]
    pub final_pin: Option<f64>,
    #[serde(rename = "PiN_percentage")]
    pub pin_percentage: Option<f64>,
    #[serde(rename = "Final Severity")]
    pub final_severity: Option<f64>,
    /// One entry per configured sector, in configured order
    pub sectors: IndexMap<String, SectorMetrics>,
}

impl Record {
    /// Metrics for a sector, if it is part of the configured list
    #[must_use]
    pub fn sector(&self, name: &str) -> Option<&SectorMetrics> {
        self.sectors.get(name)
    }
}

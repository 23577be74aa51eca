//! Static reference data and tunables for a pipeline run.
//!
//! The defaults carry the standard humanitarian sector list and the ISO3 to
//! OCHA regional office lookup. Any field can be overridden from YAML:
//!
//! ```yaml
//! sectors: [Health, WASH]
//! regions:
//!   XYZ: ROAP
//! pin_sheet: 0
//! severity_sheet: 1
//! ```

use crate::error::{PipelineError, PipelineResult};
use indexmap::IndexMap;
use pinsev_sheet::DEFAULT_HEADER_PREFIX;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Sectors in output order.
pub const DEFAULT_SECTORS: [&str; 13] = [
    "CCCM",
    "Child Protection",
    "Early Recovery",
    "Education",
    "Food Security",
    "GBV",
    "Health",
    "HLP",
    "Mine Action",
    "Nutrition",
    "Protection",
    "Shelter",
    "WASH",
];

/// ISO3 country code to OCHA regional office.
pub const DEFAULT_REGIONS: &[(&str, &str)] = &[
    // Asia and the Pacific
    ("AFG", "ROAP"),
    ("BGD", "ROAP"),
    ("MMR", "ROAP"),
    ("PAK", "ROAP"),
    ("PHL", "ROAP"),
    ("PRK", "ROAP"),
    // Latin America and the Caribbean
    ("COL", "ROLAC"),
    ("GTM", "ROLAC"),
    ("HND", "ROLAC"),
    ("HTI", "ROLAC"),
    ("SLV", "ROLAC"),
    ("VEN", "ROLAC"),
    // Middle East and North Africa
    ("IRQ", "ROMENA"),
    ("LBN", "ROMENA"),
    ("LBY", "ROMENA"),
    ("PSE", "ROMENA"),
    ("SYR", "ROMENA"),
    ("YEM", "ROMENA"),
    // Southern and Eastern Africa
    ("BDI", "ROSEA"),
    ("ETH", "ROSEA"),
    ("KEN", "ROSEA"),
    ("MDG", "ROSEA"),
    ("MOZ", "ROSEA"),
    ("SDN", "ROSEA"),
    ("SOM", "ROSEA"),
    ("SSD", "ROSEA"),
    ("UGA", "ROSEA"),
    ("ZWE", "ROSEA"),
    // West and Central Africa
    ("BFA", "ROWCA"),
    ("CAF", "ROWCA"),
    ("CMR", "ROWCA"),
    ("COD", "ROWCA"),
    ("MLI", "ROWCA"),
    ("NER", "ROWCA"),
    ("NGA", "ROWCA"),
    ("TCD", "ROWCA"),
    // Caucasus, Central Asia and Europe
    ("ARM", "ROCCA"),
    ("UKR", "ROCCA"),
];

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Sector names, in the order they appear under `sectors`
    pub sectors: Vec<String>,
    /// ISO3 code to region code
    pub regions: IndexMap<String, String>,
    /// Region used when the ISO3 code is not in `regions`
    pub unknown_region: String,
    /// First-cell prefix of the real header row
    pub header_prefix: String,
    /// Columns starting with this prefix are administrative columns
    pub admin_prefix: String,
    /// Tab index of the PiN sheet
    pub pin_sheet: usize,
    /// Tab index of the Severity sheet
    pub severity_sheet: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            sectors: DEFAULT_SECTORS.iter().map(|s| s.to_string()).collect(),
            regions: DEFAULT_REGIONS
                .iter()
                .map(|(iso3, region)| (iso3.to_string(), region.to_string()))
                .collect(),
            unknown_region: "Unknown".to_string(),
            header_prefix: DEFAULT_HEADER_PREFIX.to_string(),
            admin_prefix: "Admin".to_string(),
            pin_sheet: 0,
            severity_sheet: 1,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a YAML configuration.
    pub fn from_yaml_str(source: &str) -> PipelineResult<Self> {
        let config: PipelineConfig = serde_yaml::from_str(source)
            .map_err(|e| PipelineError::config(format!("invalid YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML configuration file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| PipelineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.sectors.is_empty() {
            return Err(PipelineError::config("sector list is empty"));
        }
        let mut seen = HashSet::new();
        for sector in &self.sectors {
            if sector.trim().is_empty() {
                return Err(PipelineError::config("sector names must not be blank"));
            }
            if !seen.insert(sector.as_str()) {
                return Err(PipelineError::config(format!("duplicate sector '{sector}'")));
            }
        }
        if self.header_prefix.is_empty() {
            return Err(PipelineError::config("header_prefix must not be empty"));
        }
        if self.admin_prefix.is_empty() {
            return Err(PipelineError::config("admin_prefix must not be empty"));
        }
        if self.pin_sheet == self.severity_sheet {
            return Err(PipelineError::config(
                "pin_sheet and severity_sheet must be different tabs",
            ));
        }
        Ok(())
    }

    /// Region for an ISO3 code, matched after trimming and upper-casing
    #[must_use]
    pub fn region_for(&self, iso3: &str) -> &str {
        let code = iso3.trim().to_ascii_uppercase();
        self.regions
            .get(&code)
            .map_or(self.unknown_region.as_str(), String::as_str)
    }
}

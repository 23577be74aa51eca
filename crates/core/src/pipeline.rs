//! The PiN/Severity pipeline, from raw sheets to records.

use crate::columns::{
    severity_column, FINAL_PIN, FINAL_SEVERITY, ISO3, MERGE_KEY, POPULATION,
};
use crate::config::PipelineConfig;
use crate::derive::{add_pin_percentage, add_region};
use crate::error::PipelineResult;
use crate::merge_key::add_merge_key;
use crate::record::Record;
use crate::reshape::{reshape, SectorColumns};
use pinsev_sheet::{Book, CoercionReport, JoinColumn, JoinReport, Projection, RawSheet, Table};
use std::path::Path;

/// What happened during a run, for logging and the CLI summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Records produced (always the PiN data row count)
    pub records: usize,
    /// PiN rows without a merge key
    pub missing_keys: usize,
    pub join: JoinReport,
    /// Non-numeric cells set to null, both sheets
    pub coercion: CoercionReport,
}

/// Records plus the run report.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub records: Vec<Record>,
    pub report: PipelineReport,
}

/// Converts a PiN sheet and a Severity sheet into records.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline, validating the configuration.
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Pipeline { config })
    }

    /// Load the configured PiN and Severity tabs from a workbook and run.
    pub fn run_workbook<P: AsRef<Path>>(&self, path: P) -> PipelineResult<PipelineOutput> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "reading workbook");
        let (pin, severity) =
            Book::open(path)?.into_pair(self.config.pin_sheet, self.config.severity_sheet)?;
        self.run(pin, severity)
    }

    /// Run every stage in order. Any structural error aborts the run.
    pub fn run(&self, pin: RawSheet, severity: RawSheet) -> PipelineResult<PipelineOutput> {
        let mut report = PipelineReport::default();

        let (mut pin, pin_coercion) = self.prepare_pin(pin)?;
        report.coercion = pin_coercion;
        report.missing_keys = add_merge_key(&mut pin)?;

        let (severity, severity_coercion) = self.prepare_severity(severity)?;
        report.coercion.merge(severity_coercion);

        let join_columns = self.severity_join_columns(&severity);
        let (joined, join) = pin.left_join(&severity, MERGE_KEY, &join_columns)?;
        report.join = join;

        let columns = SectorColumns::for_sectors(&self.config.sectors);
        let records = reshape(
            &joined,
            &self.config.sectors,
            &columns,
            &self.config.admin_prefix,
        );
        report.records = records.len();

        tracing::info!(
            records = report.records,
            matched = report.join.matched,
            unmatched = report.join.unmatched,
            skipped_cells = report.coercion.total(),
            "pipeline finished"
        );
        Ok(PipelineOutput { records, report })
    }

    /// Header, projection, coercion, region and ratio for the PiN sheet.
    fn prepare_pin(&self, raw: RawSheet) -> PipelineResult<(Table, CoercionReport)> {
        let projection = Projection::new(&self.config.admin_prefix)
            .require(ISO3)
            .require(POPULATION)
            .require(FINAL_PIN)
            .allow_all(self.config.sectors.iter().cloned());
        let mut table = raw
            .into_table(&self.config.header_prefix)?
            .project(&projection)?;

        let mut numeric: Vec<&str> = vec![POPULATION, FINAL_PIN];
        numeric.extend(self.config.sectors.iter().map(String::as_str));
        let coercion = table.coerce_numeric(&numeric);

        add_region(&mut table, &self.config)?;
        add_pin_percentage(&mut table)?;
        Ok((table, coercion))
    }

    /// Header, merge key and coercion for the Severity sheet.
    fn prepare_severity(&self, raw: RawSheet) -> PipelineResult<(Table, CoercionReport)> {
        let mut table = raw.into_table(&self.config.header_prefix)?;
        table.require_columns(&[FINAL_SEVERITY])?;
        add_merge_key(&mut table)?;

        let mut numeric: Vec<&str> = vec![FINAL_SEVERITY];
        numeric.extend(self.config.sectors.iter().map(String::as_str));
        let coercion = table.coerce_numeric(&numeric);
        Ok((table, coercion))
    }

    /// `Final Severity` plus every sector column the Severity sheet has.
    fn severity_join_columns(&self, severity: &Table) -> Vec<JoinColumn> {
        let mut columns = vec![JoinColumn::same(FINAL_SEVERITY)];
        columns.extend(
            self.config
                .sectors
                .iter()
                .filter(|sector| severity.has_column(sector))
                .map(|sector| JoinColumn::new(sector, &severity_column(sector))),
        );
        columns
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline {
            config: PipelineConfig::default(),
        }
    }
}

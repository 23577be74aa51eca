//! Columns computed from the PiN sheet: region and PiN ratio.

use crate::columns::{FINAL_PIN, ISO3, PIN_PERCENTAGE, POPULATION, REGION};
use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use pinsev_sheet::{CellValue, Table};

/// `final_pin / population`, missing unless both are numbers and the
/// population is non-zero.
#[must_use]
pub fn pin_percentage(final_pin: &CellValue, population: &CellValue) -> CellValue {
    match (final_pin.as_float(), population.as_float()) {
        (Some(pin), Some(pop)) if pop != 0.0 => CellValue::Float(pin / pop).normalized(),
        _ => CellValue::Null,
    }
}

/// Append the `Region` column from the ISO3 lookup.
pub fn add_region(table: &mut Table, config: &PipelineConfig) -> PipelineResult<()> {
    table.add_column_with(REGION, |row| {
        CellValue::from(config.region_for(&row.get(ISO3).as_str()))
    })?;
    Ok(())
}

/// Append the `PiN_percentage` column.
pub fn add_pin_percentage(table: &mut Table) -> PipelineResult<()> {
    table.add_column_with(PIN_PERCENTAGE, |row| {
        pin_percentage(row.get(FINAL_PIN), row.get(POPULATION))
    })?;
    Ok(())
}

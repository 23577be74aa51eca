//! Fold the flat per-sector columns of the joined table into records.

use crate::columns::{
    severity_column, FINAL_PIN, FINAL_SEVERITY, ISO3, PIN_PERCENTAGE, POPULATION, REGION,
};
use crate::record::{Record, SectorMetrics};
use indexmap::IndexMap;
use pinsev_sheet::{CellValue, Row, Table};

/// The two parallel sector column sets of a joined table, keyed by sector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectorColumns {
    /// Sector name to the PiN-side column
    pub pin: IndexMap<String, String>,
    /// Sector name to the Severity-side column
    pub severity: IndexMap<String, String>,
}

impl SectorColumns {
    /// PiN columns named after the sector, severity columns renamed with
    /// [`severity_column`].
    #[must_use]
    pub fn for_sectors(sectors: &[String]) -> Self {
        SectorColumns {
            pin: sectors.iter().map(|s| (s.clone(), s.clone())).collect(),
            severity: sectors
                .iter()
                .map(|s| (s.clone(), severity_column(s)))
                .collect(),
        }
    }
}

fn number(cell: &CellValue) -> Option<f64> {
    cell.as_float()
}

fn lookup<'a>(row: &Row<'a>, columns: &IndexMap<String, String>, sector: &str) -> Option<f64> {
    columns.get(sector).and_then(|column| number(row.get(column)))
}

/// Build one record per row of the joined table.
///
/// Every sector in `sectors` gets an entry, whether or not either of its
/// columns exists; absent columns and missing cells read as null.
#[must_use]
pub fn reshape(
    table: &Table,
    sectors: &[String],
    columns: &SectorColumns,
    admin_prefix: &str,
) -> Vec<Record> {
    let admin_columns: Vec<&String> = table
        .columns()
        .iter()
        .filter(|name| name.starts_with(admin_prefix))
        .collect();

    table
        .rows()
        .map(|row| {
            let admin = admin_columns
                .iter()
                .map(|name| ((*name).clone(), row.get(name).clone().normalized()))
                .collect();

            let sectors = sectors
                .iter()
                .map(|sector| {
                    let metrics = SectorMetrics {
                        pin: lookup(&row, &columns.pin, sector),
                        severity: lookup(&row, &columns.severity, sector),
                    };
                    (sector.clone(), metrics)
                })
                .collect();

            Record {
                admin,
                iso3: row.get(ISO3).as_trimmed(),
                region: row.get(REGION).as_str(),
                population: number(row.get(POPULATION)),
                final_pin: number(row.get(FINAL_PIN)),
                pin_percentage: number(row.get(PIN_PERCENTAGE)),
                final_severity: number(row.get(FINAL_SEVERITY)),
                sectors,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sectors() -> Vec<String> {
        vec!["Health".to_string(), "WASH".to_string(), "Education".to_string()]
    }

    fn joined() -> Table {
        Table::from_data(
            "PiN",
            &[
                "Admin 0",
                "Admin 1",
                "ISO3",
                "Population",
                "Final PiN",
                "Health",
                "WASH",
                "Region",
                "PiN_percentage",
                "merge_key",
                "Final Severity",
                "severity::Health",
            ],
            vec![vec![
                CellValue::from("Country X"),
                CellValue::from("Region Y"),
                CellValue::from("XYZ"),
                CellValue::Int(1000),
                CellValue::Int(250),
                CellValue::Int(100),
                CellValue::Null,
                CellValue::from("Unknown"),
                CellValue::Float(0.25),
                CellValue::from("XY01"),
                CellValue::Int(3),
                CellValue::Int(4),
            ]],
        )
        .unwrap()
    }

    #[test]
    fn test_reshape_fields() {
        let columns = SectorColumns::for_sectors(&sectors());
        let records = reshape(&joined(), &sectors(), &columns, "Admin");
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.admin.len(), 2);
        assert_eq!(record.admin["Admin 1"], CellValue::from("Region Y"));
        assert_eq!(record.iso3.as_deref(), Some("XYZ"));
        assert_eq!(record.region, "Unknown");
        assert_eq!(record.population, Some(1000.0));
        assert_eq!(record.final_pin, Some(250.0));
        assert_eq!(record.pin_percentage, Some(0.25));
        assert_eq!(record.final_severity, Some(3.0));
    }

    #[test]
    fn test_every_sector_present() {
        let columns = SectorColumns::for_sectors(&sectors());
        let record = reshape(&joined(), &sectors(), &columns, "Admin").remove(0);

        let keys: Vec<&String> = record.sectors.keys().collect();
        assert_eq!(keys, vec!["Health", "WASH", "Education"]);
        assert_eq!(
            record.sector("Health"),
            Some(&SectorMetrics { pin: Some(100.0), severity: Some(4.0) })
        );
        assert_eq!(record.sector("WASH"), Some(&SectorMetrics::default()));
        assert_eq!(record.sector("Education"), Some(&SectorMetrics::default()));
    }

    #[test]
    fn test_severity_column_names() {
        let columns = SectorColumns::for_sectors(&sectors());
        assert_eq!(columns.pin["WASH"], "WASH");
        assert_eq!(columns.severity["WASH"], "severity::WASH");
    }
}

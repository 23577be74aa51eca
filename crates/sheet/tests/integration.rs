use pinsev_sheet::{Book, CellValue, JoinColumn, Projection, RawSheet, SheetError, DEFAULT_HEADER_PREFIX};
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

fn pin_sheet() -> RawSheet {
    RawSheet::from_data(
        "PiN",
        vec![
            vec![CellValue::from("HNO 2024 - People in Need"), CellValue::Null, CellValue::Null, CellValue::Null],
            vec![CellValue::from("Source: cluster estimates"), CellValue::Null, CellValue::Null, CellValue::Null],
            vec![
                CellValue::from("Admin 0"),
                CellValue::from("Admin 2 P-Code"),
                CellValue::from("Population"),
                CellValue::from("Comment"),
            ],
            vec![CellValue::from("X"), CellValue::from("X01"), CellValue::from("1000"), CellValue::from("ok")],
            vec![CellValue::from("X"), CellValue::from("X02"), CellValue::from("N/A"), CellValue::Null],
        ],
    )
}

fn severity_sheet() -> RawSheet {
    RawSheet::from_data(
        "Severity",
        vec![
            vec![CellValue::from("Admin 0"), CellValue::from("Admin 2 P-Code"), CellValue::from("Final Severity")],
            vec![CellValue::from("X"), CellValue::from("X01"), CellValue::Int(4)],
        ],
    )
}

// ===== Raw sheet to table =====

#[test]
fn test_preamble_rows_are_absent() {
    let table = pin_sheet().into_table(DEFAULT_HEADER_PREFIX).unwrap();
    assert_eq!(table.row_count(), 2);
    assert!(table
        .rows()
        .all(|row| !row.get("Admin 0").as_str().starts_with("HNO")));
    assert_eq!(table.source_row(0), 4);
}

// ===== Working table =====

#[test]
fn test_project_coerce_join() {
    let mut pin = pin_sheet()
        .into_table(DEFAULT_HEADER_PREFIX)
        .unwrap()
        .project(&Projection::new("Admin").require("Population"))
        .unwrap();
    assert!(!pin.has_column("Comment"));

    let coercion = pin.coerce_numeric(&["Population"]);
    assert_eq!(coercion.total(), 1);
    assert_eq!(pin.get(0, "Population"), Some(&CellValue::Int(1000)));
    assert_eq!(pin.get(1, "Population"), Some(&CellValue::Null));
    assert_eq!(pin.get(1, "Admin 2 P-Code"), Some(&CellValue::from("X02")));

    let severity = severity_sheet().into_table(DEFAULT_HEADER_PREFIX).unwrap();
    let (joined, report) = pin
        .left_join(&severity, "Admin 2 P-Code", &[JoinColumn::same("Final Severity")])
        .unwrap();

    assert_eq!(joined.row_count(), 2);
    assert_eq!(report.matched, 1);
    assert_eq!(report.unmatched, 1);
    assert_eq!(joined.get(0, "Final Severity"), Some(&CellValue::Int(4)));
    assert_eq!(joined.get(1, "Final Severity"), Some(&CellValue::Null));
}

#[test]
fn test_missing_required_column_names_sheet() {
    let err = severity_sheet()
        .into_table(DEFAULT_HEADER_PREFIX)
        .unwrap()
        .project(&Projection::new("Admin").require("Population"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Required column 'Population' missing from sheet 'Severity'"
    );
}

#[test]
fn test_header_not_found_message() {
    let err = RawSheet::from_data("Severity", vec![vec!["no header here"]])
        .into_table(DEFAULT_HEADER_PREFIX)
        .unwrap_err();
    assert!(matches!(err, SheetError::HeaderNotFound { .. }));
    assert!(err.to_string().contains("'Severity'"));
}

// ===== Workbook loading =====

#[test]
fn test_workbook_tabs_to_tables() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("needs.xlsx");

    let mut workbook = Workbook::new();
    let pin = workbook.add_worksheet();
    pin.set_name("PiN").unwrap();
    pin.write_string(0, 0, "Preamble").unwrap();
    pin.write_string(2, 0, "Admin 0").unwrap();
    pin.write_string(2, 1, "Population").unwrap();
    pin.write_string(3, 0, "Country X").unwrap();
    pin.write_number(3, 1, 500.0).unwrap();
    let severity = workbook.add_worksheet();
    severity.set_name("Severity").unwrap();
    severity.write_string(0, 0, "Admin 0").unwrap();
    workbook.save(&path).unwrap();

    let (pin, severity) = Book::open(&path).unwrap().into_pair(0, 1).unwrap();
    let table = pin.into_table(DEFAULT_HEADER_PREFIX).unwrap();
    assert_eq!(table.header_row(), 3);
    assert_eq!(table.get(0, "Population"), Some(&CellValue::Float(500.0)));

    let empty = severity.into_table(DEFAULT_HEADER_PREFIX).unwrap();
    assert!(empty.is_empty());
}

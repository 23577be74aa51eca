use thiserror::Error;

/// Errors that can occur while turning a workbook tab into a table
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Header row not found in sheet '{sheet}': no row starts with '{prefix}'")]
    HeaderNotFound { sheet: String, prefix: String },

    #[error("Duplicate column name '{column}' in sheet '{sheet}' (header at row {row})")]
    AmbiguousColumn {
        sheet: String,
        column: String,
        row: usize,
    },

    #[error("Required column '{column}' missing from sheet '{sheet}'")]
    MissingRequiredColumn { sheet: String, column: String },

    #[error("Column not found in sheet '{sheet}': {column}")]
    ColumnNotFound { sheet: String, column: String },

    #[error("Column already exists in sheet '{sheet}': {column}")]
    DuplicateColumn { sheet: String, column: String },

    #[error("Data length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Sheet index {index} out of range (workbook has {count} sheets)")]
    SheetIndexOutOfRange { index: usize, count: usize },

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("PiN and Severity cannot both be read from sheet index {index}")]
    SameSheetIndex { index: usize },
}

pub type Result<T> = std::result::Result<T, SheetError>;

use serde::Serialize;
use std::fmt;

/// Represents a cell value in a sheet
///
/// `Null` is the explicit "missing" marker: blank cells, unparsable numbers
/// and unmatched join columns all end up here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    /// Check if the value is the missing marker
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Check if the value is missing or a string that is empty after trimming
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Try to get the value as a float
    ///
    /// Only numeric variants convert; strings are not parsed here, use
    /// [`CellValue::to_numeric`] for that.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) if f.is_finite() => Some(*f),
            CellValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get the value as a string
    #[must_use]
    pub fn as_str(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::String(s) => s.clone(),
        }
    }

    /// Get the trimmed string form, or `None` when blank
    #[must_use]
    pub fn as_trimmed(&self) -> Option<String> {
        let s = self.as_str();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Convert to a numeric cell, or `None` if the value is not a number.
    ///
    /// Numbers pass through, strings in standard decimal notation (with
    /// optional surrounding whitespace) are parsed. Non-finite values and
    /// booleans are not numbers.
    #[must_use]
    pub fn to_numeric(&self) -> Option<CellValue> {
        match self {
            CellValue::Int(i) => Some(CellValue::Int(*i)),
            CellValue::Float(f) if f.is_finite() => Some(CellValue::Float(*f)),
            CellValue::String(s) => {
                let trimmed = s.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    return Some(CellValue::Int(i));
                }
                // Rust accepts "inf"/"NaN" spellings, which are not data
                match trimmed.parse::<f64>() {
                    Ok(f) if f.is_finite() => Some(CellValue::Float(f)),
                    _ => None,
                }
            }
            CellValue::Float(_) | CellValue::Bool(_) | CellValue::Null => None,
        }
    }

    /// Map non-finite floats to `Null`, leaving everything else untouched
    #[must_use]
    pub fn normalized(self) -> CellValue {
        match self {
            CellValue::Float(f) if !f.is_finite() => CellValue::Null,
            other => other,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(fl) => write!(f, "{fl}"),
            CellValue::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

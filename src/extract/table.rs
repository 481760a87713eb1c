use indexmap::IndexMap;

/// A scalar spreadsheet cell after type inference.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// ISO-8601 rendering of a date/time cell.
    DateTime(String),
}

impl From<f64> for CellValue {
    /// Whole numbers come back from the sheet as floats; store them as ints.
    fn from(f: f64) -> Self {
        if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
            CellValue::Int(f as i64)
        } else {
            CellValue::Float(f)
        }
    }
}

/// Column label -> cell value, in column order.
pub type Row = IndexMap<String, CellValue>;

/// Sheet name -> rows, in workbook order. Serializes with keys in insertion
/// order.
pub type TableSet = IndexMap<String, Vec<Row>>;

use super::table::{CellValue, Row, TableSet};
use crate::error::{Error, Result};
use crate::format::FileType;
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::collections::HashMap;
use std::path::Path;

/// Reads every sheet into row records keyed by the header row's labels.
pub fn extract_tables_xlsx(path: &Path) -> Result<TableSet> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e| Error::extraction(FileType::Excel, e))?;

    let mut tables = TableSet::new();
    for sheet_name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| Error::extraction(FileType::Excel, e))?;

        let mut rows = range.rows();
        let headers = match rows.next() {
            Some(header_row) => header_labels(header_row),
            None => {
                tables.insert(sheet_name, Vec::new());
                continue;
            }
        };

        let records: Vec<Row> = rows
            .filter(|row| !row.iter().all(|c| matches!(c, Data::Empty)))
            .map(|row| {
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, label)| {
                        let value = row.get(i).map(cell_value).unwrap_or(CellValue::Null);
                        (label.clone(), value)
                    })
                    .collect()
            })
            .collect();

        tables.insert(sheet_name, records);
    }

    Ok(tables)
}

/// Blank labels become `Unnamed: <i>`; repeats get `.1`, `.2`, ... suffixes.
pub fn header_labels(row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut labels = Vec::with_capacity(row.len());

    for (i, cell) in row.iter().enumerate() {
        let base = match cell_value(cell) {
            CellValue::Null => format!("Unnamed: {i}"),
            CellValue::String(s) | CellValue::DateTime(s) => s,
            CellValue::Int(n) => n.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => (if b { "True" } else { "False" }).to_string(),
        };

        let mut label = base.clone();
        if let Some(&used) = seen.get(&base) {
            let mut n = used;
            loop {
                n += 1;
                label = format!("{base}.{n}");
                if !seen.contains_key(&label) {
                    break;
                }
            }
            seen.insert(base, n);
        }
        seen.entry(label.clone()).or_insert(0);
        labels.push(label);
    }

    labels
}

pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) if s.is_empty() => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::from(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                return CellValue::from(dt.as_f64());
            }
            match dt.as_datetime() {
                Some(ndt) => CellValue::DateTime(ndt.format("%Y-%m-%dT%H:%M:%S").to_string()),
                None => CellValue::from(dt.as_f64()),
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::DateTime(s.clone()),
        Data::Error(e) => CellValue::String(e.to_string()),
    }
}

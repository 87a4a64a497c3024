use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::{ExportError, Result};

/// Workbook handle used by the export pipeline.
pub type Workbook = Xlsx<BufReader<File>>;

static EMPTY_CELL: CellValue = CellValue::Text(String::new());

/// Raw cell value as read from the sheet. No coercion happens at load time;
/// interpreting a cell as an integer, boolean, or trimmed string is the
/// normalizer's job.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// String cell. Absent, empty, and error cells all normalize to the
    /// empty text value, never to a null or not-a-number sentinel.
    Text(String),
    /// Floating point cell.
    Number(f64),
    /// Integer cell.
    Integer(i64),
    /// Boolean cell.
    Boolean(bool),
}

impl CellValue {
    /// Whether the cell holds no usable text. Only text cells can be blank;
    /// a numeric or boolean cell always carries a value.
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Text(value) if value.trim().is_empty())
    }
}

/// A single sheet row, mapping normalized column names to raw cell values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<String, CellValue>,
}

impl Row {
    /// Looks up a cell by column name. Columns absent from the sheet yield
    /// the empty text value so callers can treat "missing" and "blank"
    /// identically.
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&EMPTY_CELL)
    }

    /// Inserts or replaces a cell value.
    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Row {
            cells: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value))
                .collect(),
        }
    }
}

/// Opens an expedition workbook for reading.
pub fn open(path: &Path) -> Result<Workbook> {
    Ok(open_workbook(path)?)
}

/// Loads one sheet as an ordered sequence of rows.
///
/// `header_row` is the 0-indexed offset of the header row; every row beneath
/// it becomes a [`Row`]. Headers are trimmed and stripped of byte-order-mark
/// artifacts. A missing sheet is fatal.
pub fn load_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
    header_row: usize,
) -> Result<Vec<Row>> {
    let range = workbook
        .worksheet_range(name)
        .ok_or_else(|| ExportError::MissingSheet(name.to_string()))?
        .map_err(ExportError::from)?;

    let headers: Vec<String> = match range.rows().nth(header_row) {
        Some(row) => row.iter().map(|cell| normalize_header(cell)).collect(),
        None => return Ok(Vec::new()),
    };

    let rows = range
        .rows()
        .skip(header_row + 1)
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, header)| !header.is_empty())
                .map(|(col_idx, header)| {
                    let value = row
                        .get(col_idx)
                        .map(cell_value)
                        .unwrap_or_else(|| CellValue::Text(String::new()));
                    (header.clone(), value)
                })
                .collect()
        })
        .collect();

    Ok(rows)
}

fn normalize_header(cell: &DataType) -> String {
    cell_to_string(cell).replace('\u{feff}', "").trim().to_string()
}

fn cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(value) => CellValue::Text(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Integer(*value),
        DataType::Bool(value) => CellValue::Boolean(*value),
        DataType::Empty | DataType::Error(_) => CellValue::Text(String::new()),
        other => CellValue::Text(other.to_string()),
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}

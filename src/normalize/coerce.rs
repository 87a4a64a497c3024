use crate::io::sheet::CellValue;

/// Parses the heterogeneous truthy representations found across the sheets:
/// native booleans, nonzero numbers, and the strings `true`, `1`, `yes`, `y`
/// (case-insensitive). Everything else is false.
pub fn truthy(cell: &CellValue) -> bool {
    match cell {
        CellValue::Boolean(value) => *value,
        CellValue::Integer(value) => *value != 0,
        CellValue::Number(value) => *value != 0.0,
        CellValue::Text(value) => matches!(
            value.trim().to_lowercase().as_str(),
            "true" | "1" | "yes" | "y"
        ),
    }
}

/// Integer coercion with default-on-failure: an absent, blank, or unparsable
/// cell yields `default`, never an error. Fractional values truncate.
pub fn int_or(cell: &CellValue, default: i64) -> i64 {
    opt_int(cell).unwrap_or(default)
}

/// Float coercion with default-on-failure.
pub fn float_or(cell: &CellValue, default: f64) -> f64 {
    match cell {
        CellValue::Number(value) => *value,
        CellValue::Integer(value) => *value as f64,
        CellValue::Boolean(value) => {
            if *value {
                1.0
            } else {
                0.0
            }
        }
        CellValue::Text(value) => value.trim().parse().unwrap_or(default),
    }
}

/// Strict integer coercion for identity fields. Blank and non-numeric cells
/// yield `None` so callers can skip the row instead of inventing a value.
pub fn opt_int(cell: &CellValue) -> Option<i64> {
    match cell {
        CellValue::Integer(value) => Some(*value),
        CellValue::Number(value) => Some(*value as i64),
        CellValue::Boolean(value) => Some(i64::from(*value)),
        CellValue::Text(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|parsed| parsed as i64))
        }
    }
}

/// Renders a cell as a trimmed string.
pub fn trimmed(cell: &CellValue) -> String {
    match cell {
        CellValue::Text(value) => value.trim().to_string(),
        CellValue::Integer(value) => value.to_string(),
        CellValue::Number(value) => value.to_string(),
        CellValue::Boolean(value) => value.to_string(),
    }
}

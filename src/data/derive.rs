use super::model::{
    CellValue, InventoryTable, PRIOR_STOCK, PROP_ORDER, SUMMED_FIELDS, THREE_MONTH_COVERAGE,
};

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Read a cell as a number.  Anything that is not a number, or text
/// holding one, is NaN.
pub fn coerce_numeric(cell: &CellValue) -> f64 {
    match cell {
        CellValue::Integer(i) => *i as f64,
        CellValue::Float(f) => *f,
        CellValue::Bool(b) => f64::from(u8::from(*b)),
        CellValue::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        CellValue::Date(_) | CellValue::Null => f64::NAN,
    }
}

/// Rewrite a cell in numeric form, keeping integers integral.
fn to_numeric_cell(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Integer(_) | CellValue::Float(_) => cell.clone(),
        CellValue::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => CellValue::Integer(i),
            Err(_) => CellValue::Float(coerce_numeric(cell)),
        },
        CellValue::Bool(b) => CellValue::Integer(i64::from(*b)),
        CellValue::Date(_) | CellValue::Null => CellValue::Float(f64::NAN),
    }
}

// ---------------------------------------------------------------------------
// Proposed order
// ---------------------------------------------------------------------------

/// `coefficient * 3MCov - StockPrev` for one row.
pub fn prop_order(coefficient: f64, coverage: &CellValue, prior_stock: &CellValue) -> f64 {
    coefficient * coerce_numeric(coverage) - coerce_numeric(prior_stock)
}

/// Add the `PropOrder` column and coerce the summed fields to numbers.
///
/// `PropOrder` is appended after the source columns, or overwritten in
/// place if the source already has one.  Malformed values become NaN;
/// no row is ever dropped.
pub fn derive_prop_order(mut table: InventoryTable, coefficient: f64) -> InventoryTable {
    let coverage_idx = table.column_index(THREE_MONTH_COVERAGE);
    let prior_idx = table.column_index(PRIOR_STOCK);
    let prop_idx = match table.column_index(PROP_ORDER) {
        Some(i) => i,
        None => {
            table.columns.push(PROP_ORDER.to_string());
            for row in &mut table.rows {
                row.push(CellValue::Null);
            }
            table.columns.len() - 1
        }
    };

    let numeric_idx: Vec<usize> = SUMMED_FIELDS
        .iter()
        .filter(|name| **name != PROP_ORDER)
        .filter_map(|name| table.column_index(name))
        .collect();

    for row in &mut table.rows {
        let coverage = coverage_idx.map_or(&CellValue::Null, |i| &row[i]);
        let prior = prior_idx.map_or(&CellValue::Null, |i| &row[i]);
        let value = prop_order(coefficient, coverage, prior);
        row[prop_idx] = CellValue::Float(value);

        for &i in &numeric_idx {
            row[i] = to_numeric_cell(&row[i]);
        }
    }

    table
}

use super::model::{CellValue, InventoryTable, PRODUCT_LINE};

// ---------------------------------------------------------------------------
// Product-line filter
// ---------------------------------------------------------------------------

/// Product lines offered for selection, in order of first appearance.
pub fn product_lines(dataset: &InventoryTable) -> Vec<String> {
    dataset
        .unique_values(PRODUCT_LINE)
        .iter()
        .map(CellValue::to_string)
        .collect()
}

/// Return the rows whose `ProductLine` equals `product_line`.
///
/// Matching is exact on the cell's text form, so a numeric product line
/// such as `7` matches the selection `"7"`.  An unknown value yields an
/// empty table with the same columns.
pub fn filter_by_product_line(dataset: &InventoryTable, product_line: &str) -> InventoryTable {
    let Some(idx) = dataset.column_index(PRODUCT_LINE) else {
        return InventoryTable::new(dataset.columns.clone(), Vec::new());
    };

    let rows = dataset
        .rows
        .iter()
        .filter(|row| matches_text(&row[idx], product_line))
        .cloned()
        .collect();

    InventoryTable::new(dataset.columns.clone(), rows)
}

fn matches_text(cell: &CellValue, wanted: &str) -> bool {
    match cell {
        CellValue::String(s) => s == wanted,
        CellValue::Null => false,
        other => other.to_string() == wanted,
    }
}

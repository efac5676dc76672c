use std::collections::HashMap;

use super::derive::coerce_numeric;
use super::model::{CellValue, GroupingColumn, InventoryTable, SUMMED_FIELDS};

// ---------------------------------------------------------------------------
// Aggregated rows
// ---------------------------------------------------------------------------

/// Sums for one distinct value of the grouping column.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    pub key: CellValue,
    /// One sum per entry of [`SUMMED_FIELDS`].
    pub totals: [f64; SUMMED_FIELDS.len()],
    /// One sum per time bucket, aligned with [`Summary::buckets`].
    pub bucket_totals: Vec<f64>,
}

impl AggregatedRow {
    fn new(key: CellValue, n_buckets: usize) -> Self {
        AggregatedRow {
            key,
            totals: [0.0; SUMMED_FIELDS.len()],
            bucket_totals: vec![0.0; n_buckets],
        }
    }

    /// Total of a summed field by column name.
    pub fn total(&self, field: &str) -> Option<f64> {
        SUMMED_FIELDS
            .iter()
            .position(|f| *f == field)
            .map(|i| self.totals[i])
    }
}

/// The grouped view of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub category: GroupingColumn,
    /// Time-bucket columns that were summed, in source order.
    pub buckets: Vec<String>,
    /// One row per group, in order of first appearance.
    pub rows: Vec<AggregatedRow>,
}

impl Summary {
    /// Sum of each time bucket across every group.
    pub fn bucket_grand_totals(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.buckets.len()];
        for row in &self.rows {
            for (acc, v) in totals.iter_mut().zip(&row.bucket_totals) {
                *acc += v;
            }
        }
        totals
    }
}

/// NaN contributes nothing to a sum.
fn summable(cell: &CellValue) -> f64 {
    let v = coerce_numeric(cell);
    if v.is_nan() { 0.0 } else { v }
}

// ---------------------------------------------------------------------------
// Group-by
// ---------------------------------------------------------------------------

/// Group `table` by `category` and sum the fixed fields and `buckets`.
///
/// Rows with a null or NaN grouping value belong to no group.  A missing column
/// (summed field or bucket) sums to zero.
pub fn aggregate(table: &InventoryTable, category: GroupingColumn, buckets: &[String]) -> Summary {
    let mut summary = Summary {
        category,
        buckets: buckets.to_vec(),
        rows: Vec::new(),
    };

    let Some(key_idx) = table.column_index(category.as_str()) else {
        log::warn!("Grouping column {category} not present; summary is empty");
        return summary;
    };
    let field_idx: Vec<Option<usize>> = SUMMED_FIELDS
        .iter()
        .map(|f| table.column_index(f))
        .collect();
    let bucket_idx: Vec<Option<usize>> = buckets.iter().map(|b| table.column_index(b)).collect();

    let mut positions: HashMap<&CellValue, usize> = HashMap::new();
    for row in &table.rows {
        let key = &row[key_idx];
        if key.is_missing() {
            continue;
        }
        let pos = *positions.entry(key).or_insert_with(|| {
            summary.rows.push(AggregatedRow::new(key.clone(), buckets.len()));
            summary.rows.len() - 1
        });
        let group = &mut summary.rows[pos];

        for (total, idx) in group.totals.iter_mut().zip(&field_idx) {
            if let Some(i) = idx {
                *total += summable(&row[*i]);
            }
        }
        for (total, idx) in group.bucket_totals.iter_mut().zip(&bucket_idx) {
            if let Some(i) = idx {
                *total += summable(&row[*i]);
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{PROP_ORDER, QUANTITY_ON_BACK_ORDER, QUANTITY_ON_HAND};

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    /// Category1, QuantityOnHand, QuantityOnBackOrder, PropOrder, 2023-01, 2023-02
    fn table(rows: Vec<[CellValue; 6]>) -> InventoryTable {
        let columns = ["Category1", QUANTITY_ON_HAND, QUANTITY_ON_BACK_ORDER, PROP_ORDER, "2023-01", "2023-02"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        InventoryTable::new(columns, rows.into_iter().map(Vec::from).collect())
    }

    fn buckets() -> Vec<String> {
        vec!["2023-01".to_string(), "2023-02".to_string()]
    }

    fn int(i: i64) -> CellValue {
        CellValue::Integer(i)
    }

    #[test]
    fn malformed_quantities_count_as_zero() {
        let t = table(vec![
            [s("socks"), s("10"), int(0), int(0), int(0), int(0)],
            [s("socks"), s("bad"), int(0), int(0), int(0), int(0)],
            [s("socks"), s("20"), int(0), int(0), int(0), int(0)],
        ]);
        let summary = aggregate(&t, GroupingColumn::Category1, &buckets());
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].total(QUANTITY_ON_HAND), Some(30.0));
    }

    #[test]
    fn groups_follow_first_appearance() {
        let t = table(vec![
            [s("b"), int(1), int(1), int(1), int(1), int(1)],
            [s("a"), int(2), int(2), int(2), int(2), int(2)],
            [s("b"), int(3), int(3), CellValue::Float(f64::NAN), int(3), int(3)],
        ]);
        let summary = aggregate(&t, GroupingColumn::Category1, &buckets());
        let keys: Vec<_> = summary.rows.iter().map(|r| r.key.clone()).collect();
        assert_eq!(keys, vec![s("b"), s("a")]);
        assert_eq!(summary.rows[0].total(QUANTITY_ON_HAND), Some(4.0));
        assert_eq!(summary.rows[0].total(PROP_ORDER), Some(1.0));
        assert_eq!(summary.rows[0].bucket_totals, vec![4.0, 4.0]);
        assert_eq!(summary.bucket_grand_totals(), vec![6.0, 6.0]);
    }

    #[test]
    fn sums_do_not_depend_on_row_order() {
        let rows = vec![
            [s("x"), int(5), int(1), CellValue::Float(2.5), int(7), s("oops")],
            [s("y"), int(9), int(2), CellValue::Float(-1.0), int(1), int(2)],
            [s("x"), s("3"), int(4), CellValue::Float(0.5), int(3), int(8)],
        ];
        let mut shuffled = rows.clone();
        shuffled.reverse();

        let forward = aggregate(&table(rows), GroupingColumn::Category1, &buckets());
        let backward = aggregate(&table(shuffled), GroupingColumn::Category1, &buckets());
        for row in &forward.rows {
            let other = backward.rows.iter().find(|r| r.key == row.key).unwrap();
            assert_eq!(row.totals, other.totals);
            assert_eq!(row.bucket_totals, other.bucket_totals);
        }
    }

    #[test]
    fn whole_float_and_integer_keys_form_one_group() {
        let t = table(vec![
            [int(1), int(2), int(0), int(0), int(1), int(0)],
            [CellValue::Float(1.0), int(3), int(0), int(0), int(1), int(0)],
            [CellValue::Float(1.5), int(4), int(0), int(0), int(1), int(0)],
        ]);
        let summary = aggregate(&t, GroupingColumn::Category1, &buckets());
        let keys: Vec<_> = summary.rows.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, vec!["1", "1.5"]);
        assert_eq!(summary.rows[0].key, int(1));
        assert_eq!(summary.rows[0].total(QUANTITY_ON_HAND), Some(5.0));
        assert_eq!(summary.rows[0].bucket_totals, vec![2.0, 0.0]);
    }

    #[test]
    fn null_keys_are_dropped_and_empty_input_gives_no_rows() {
        let t = table(vec![[CellValue::Null, int(1), int(1), int(1), int(1), int(1)]]);
        assert!(aggregate(&t, GroupingColumn::Category1, &buckets()).rows.is_empty());
        assert!(aggregate(&table(Vec::new()), GroupingColumn::Category1, &buckets()).rows.is_empty());
    }

    #[test]
    fn absent_grouping_column_is_empty_not_an_error() {
        let t = table(vec![[s("a"), int(1), int(1), int(1), int(1), int(1)]]);
        let summary = aggregate(&t, GroupingColumn::Gender, &buckets());
        assert!(summary.rows.is_empty());
        assert_eq!(summary.buckets, buckets());
    }
}

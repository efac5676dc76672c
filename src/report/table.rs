use serde::Serialize;
use serde_json::{Map, Value};

use super::format::format_thousands;
use crate::data::aggregate::Summary;
use crate::data::model::SUMMED_FIELDS;

/// Column header handed to the table widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub id: String,
}

/// The summary table: grouping column followed by the five summed fields,
/// every value pre-formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub columns: Vec<ColumnDescriptor>,
    /// One record per group: column id → display text.
    pub rows: Vec<Map<String, Value>>,
}

impl SummaryTable {
    pub fn build(summary: &Summary) -> Self {
        let category = summary.category.as_str();
        let columns = std::iter::once(category)
            .chain(SUMMED_FIELDS)
            .map(|c| ColumnDescriptor {
                name: c.to_string(),
                id: c.to_string(),
            })
            .collect();

        let rows = summary
            .rows
            .iter()
            .map(|row| {
                let mut record = Map::new();
                record.insert(category.to_string(), Value::String(row.key.to_string()));
                for (field, total) in SUMMED_FIELDS.iter().zip(row.totals) {
                    record.insert(field.to_string(), Value::String(format_thousands(total)));
                }
                record
            })
            .collect();

        SummaryTable { columns, rows }
    }

    /// Display text of one cell, empty when absent.
    pub fn cell(&self, row: usize, column_id: &str) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column_id))
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::AggregatedRow;
    use crate::data::model::{CellValue, GroupingColumn, PROP_ORDER, QUANTITY_ON_HAND};

    fn summary() -> Summary {
        Summary {
            category: GroupingColumn::Gender,
            buckets: vec!["2023-01".into()],
            rows: vec![AggregatedRow {
                key: CellValue::String("F".into()),
                totals: [1234.0, 0.0, 12.4, 1_000_000.0, -5600.0],
                bucket_totals: vec![99_999.0],
            }],
        }
    }

    #[test]
    fn columns_are_category_then_fixed_fields() {
        let table = SummaryTable::build(&summary());
        let ids: Vec<_> = table.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "UDF_GENDER",
                "QuantityOnHand",
                "QuantityOnPurchaseOrder",
                "QuantityOnSalesOrder",
                "QuantityOnBackOrder",
                "PropOrder"
            ]
        );
    }

    #[test]
    fn values_are_formatted_and_buckets_left_out() {
        let table = SummaryTable::build(&summary());
        assert_eq!(table.cell(0, "UDF_GENDER"), "F");
        assert_eq!(table.cell(0, QUANTITY_ON_HAND), "1,234");
        assert_eq!(table.cell(0, "QuantityOnSalesOrder"), "12");
        assert_eq!(table.cell(0, "QuantityOnBackOrder"), "1,000,000");
        assert_eq!(table.cell(0, PROP_ORDER), "-5,600");
        assert!(table.rows[0].get("2023-01").is_none());
        assert_eq!(table.rows[0].len(), 6);
    }

    #[test]
    fn serializes_as_records() {
        let json = serde_json::to_value(SummaryTable::build(&summary())).unwrap();
        assert_eq!(json["rows"][0]["QuantityOnHand"], "1,234");
        assert_eq!(json["columns"][0]["name"], "UDF_GENDER");
    }
}

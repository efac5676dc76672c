/// Presentation layer: one pipeline run from raw rows to display payloads.
///
/// ```text
///   InventoryTable ──filter──▶ rows of one product line
///                  ──derive──▶ + PropOrder, numeric coercion   (kept for export)
///                  ──columns─▶ YYYY-MM buckets
///                  ──aggregate▶ Summary
///                  ──table / chart──▶ Dashboard
/// ```
pub mod chart;
pub mod export;
pub mod format;
pub mod table;

use serde::{Deserialize, Serialize};

use crate::data::aggregate::{Summary, aggregate};
use crate::data::columns::time_bucket_columns;
use crate::data::derive::derive_prop_order;
use crate::data::filter::filter_by_product_line;
use crate::data::model::{GroupingColumn, InventoryTable};
use chart::{BarChart, LineChart, bar_chart, line_chart};
use table::SummaryTable;

/// Lowest and highest proposed-order coefficient offered to the user.
pub const COEFFICIENT_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// The three user inputs that drive a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    pub product_line: String,
    pub coefficient: f64,
    pub category: GroupingColumn,
}

/// Everything the UI renders after a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub table: SummaryTable,
    pub bar_chart: BarChart,
    pub line_chart: LineChart,
}

/// The result of one run, including the row-level set offered for export.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// Rows of the selected product line after derivation, before grouping.
    pub filtered: InventoryTable,
    pub summary: Summary,
    pub dashboard: Dashboard,
}

/// Run filter → derive → classify → aggregate → present for one set of inputs.
///
/// Pure: the dataset is not modified and nothing is cached between calls.
pub fn run_pipeline(dataset: &InventoryTable, params: &PipelineParams) -> PipelineRun {
    let filtered = filter_by_product_line(dataset, &params.product_line);
    let filtered = derive_prop_order(filtered, params.coefficient);

    // One bucket list feeds aggregation, table and charts alike.
    let buckets = time_bucket_columns(&filtered.columns);
    let summary = aggregate(&filtered, params.category, &buckets);

    let dashboard = Dashboard {
        table: SummaryTable::build(&summary),
        bar_chart: bar_chart(&summary),
        line_chart: line_chart(&summary),
    };

    log::debug!(
        "Pipeline run for {:?} (coefficient {}, by {}): {} rows, {} groups, {} buckets",
        params.product_line,
        params.coefficient,
        params.category,
        filtered.len(),
        summary.rows.len(),
        buckets.len()
    );

    PipelineRun {
        filtered,
        summary,
        dashboard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::derive::coerce_numeric;
    use crate::data::model::tests::inventory_columns;
    use crate::data::model::{CellValue, PROP_ORDER, QUANTITY_ON_HAND};

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    /// Rows: (line, Category1, gender, on hand, 3MCov, StockPrev, 2023-01, 2023-02)
    fn dataset(months: &[&str], rows: &[(&str, &str, &str, CellValue, f64, f64, i64, i64)]) -> InventoryTable {
        let columns = inventory_columns(months);
        let idx = |name: &str| columns.iter().position(|c| c == name).unwrap();
        let records = rows
            .iter()
            .map(|(line, cat, gender, qoh, cov, prev, m1, m2)| {
                let mut r = vec![CellValue::Integer(0); columns.len()];
                r[idx("ProductLine")] = s(line);
                r[idx("Category1")] = s(cat);
                r[idx("UDF_GENDER")] = s(gender);
                r[idx(QUANTITY_ON_HAND)] = qoh.clone();
                r[idx("3MCov")] = CellValue::Float(*cov);
                r[idx("StockPrev")] = CellValue::Float(*prev);
                if !months.is_empty() {
                    r[idx(months[0])] = CellValue::Integer(*m1);
                    r[idx(months[1])] = CellValue::Integer(*m2);
                }
                r
            })
            .collect();
        InventoryTable::from_records(columns.clone(), records).unwrap()
    }

    fn params(line: &str, coefficient: f64, category: GroupingColumn) -> PipelineParams {
        PipelineParams {
            product_line: line.to_string(),
            coefficient,
            category,
        }
    }

    fn sample() -> InventoryTable {
        dataset(
            &["2023-01", "2023-02"],
            &[
                ("A", "tops", "M", s("10"), 2.0, 5.0, 1, 2),
                ("A", "socks", "F", s("bad"), 1.0, 0.0, 3, 4),
                ("B", "tops", "M", s("99"), 9.0, 9.0, 50, 50),
                ("A", "tops", "F", s("20"), 0.5, 1.0, 5, 6),
            ],
        )
    }

    #[test]
    fn full_run_summarises_selected_line() {
        let run = run_pipeline(&sample(), &params("A", 10.0, GroupingColumn::Category1));

        assert_eq!(run.filtered.len(), 3);
        assert_eq!(run.summary.rows.len(), 2);
        let tops = &run.summary.rows[0];
        assert_eq!(tops.key, s("tops"));
        assert_eq!(tops.total(QUANTITY_ON_HAND), Some(30.0));
        // (10*2 - 5) + (10*0.5 - 1)
        assert_eq!(tops.total(PROP_ORDER), Some(19.0));

        let table = &run.dashboard.table;
        assert_eq!(table.cell(0, "Category1"), "tops");
        assert_eq!(table.cell(1, QUANTITY_ON_HAND), "0");
        assert_eq!(table.cell(1, PROP_ORDER), "10");

        let line = &run.dashboard.line_chart.series;
        assert_eq!(line.x, vec!["2023-01".to_string(), "2023-02".to_string()]);
        assert_eq!(line.y, vec![9.0, 12.0]);
    }

    #[test]
    fn filtered_set_keeps_derived_rows_for_export() {
        let run = run_pipeline(&sample(), &params("A", 100.0, GroupingColumn::Gender));
        let props: Vec<f64> = run.filtered.column_values(PROP_ORDER).map(coerce_numeric).collect();
        assert_eq!(props, vec![195.0, 100.0, 49.0]);
        assert!(run.filtered.column_values("ProductLine").all(|v| *v == s("A")));
    }

    #[test]
    fn grouping_column_changes_groups_not_rows() {
        let by_gender = run_pipeline(&sample(), &params("A", 75.0, GroupingColumn::Gender));
        let keys: Vec<_> = by_gender.summary.rows.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, vec!["M", "F"]);
        assert_eq!(by_gender.dashboard.bar_chart.series[0].x, keys);
        assert_eq!(by_gender.dashboard.table.columns[0].id, "UDF_GENDER");
    }

    #[test]
    fn unknown_line_gives_empty_outputs() {
        let run = run_pipeline(&sample(), &params("Z", 75.0, GroupingColumn::Category1));
        assert!(run.filtered.is_empty());
        assert!(run.dashboard.table.rows.is_empty());
        assert!(run.dashboard.bar_chart.series.iter().all(|s| s.is_empty()));
        assert_eq!(run.dashboard.line_chart.series.y, vec![0.0, 0.0]);
    }

    #[test]
    fn no_month_columns_gives_empty_line_series() {
        let ds = dataset(&[], &[("A", "tops", "M", s("1"), 1.0, 1.0, 0, 0)]);
        let run = run_pipeline(&ds, &params("A", 75.0, GroupingColumn::Category1));
        assert!(run.summary.buckets.is_empty());
        assert!(run.dashboard.line_chart.series.is_empty());
        assert_eq!(run.dashboard.table.rows.len(), 1);
    }

    #[test]
    fn dataset_is_left_untouched() {
        let ds = sample();
        let before = ds.clone();
        let _ = run_pipeline(&ds, &params("A", 75.0, GroupingColumn::Category1));
        assert_eq!(ds, before);
    }
}

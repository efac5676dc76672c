use anyhow::Result;

use crate::config::AppConfig;
use crate::data::filter::product_lines;
use crate::data::model::{GroupingColumn, InventoryTable, PROP_ORDER};
use crate::report::export::{ExportFile, export_filtered};
use crate::report::{PipelineParams, PipelineRun, run_pipeline};

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full state of one dashboard session, independent of rendering.
///
/// The last pipeline run (and with it the filtered set used for export)
/// belongs to this session only.
pub struct DashboardState {
    /// Loaded dataset (None until a file has been loaded).
    pub dataset: Option<InventoryTable>,

    /// Product lines of the dataset, in order of first appearance.
    pub product_lines: Vec<String>,

    /// Current user inputs.
    pub params: PipelineParams,

    /// Outputs of the most recent run.
    pub last_run: Option<PipelineRun>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl DashboardState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            dataset: None,
            product_lines: Vec::new(),
            params: PipelineParams {
                product_line: String::new(),
                coefficient: config.initial_coefficient(),
                category: config.default_category,
            },
            last_run: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset, select its first product line and run.
    pub fn set_dataset(&mut self, dataset: InventoryTable) {
        self.product_lines = product_lines(&dataset);
        self.params.product_line = self.product_lines.first().cloned().unwrap_or_default();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.rerun();
    }

    /// Recompute every output from the current inputs.
    pub fn rerun(&mut self) {
        self.last_run = self
            .dataset
            .as_ref()
            .map(|ds| run_pipeline(ds, &self.params));

        if let Some(run) = &self.last_run {
            if run.filtered.is_empty() {
                log::warn!("No rows for product line '{}'", self.params.product_line);
            }
            let proposed: f64 = run
                .summary
                .rows
                .iter()
                .filter_map(|row| row.total(PROP_ORDER))
                .sum();
            log::debug!(
                "{} groups by {}, proposed order total {proposed}",
                run.summary.rows.len(),
                run.summary.category
            );
        }
    }

    pub fn set_product_line(&mut self, product_line: String) {
        if self.params.product_line != product_line {
            self.params.product_line = product_line;
            self.rerun();
        }
    }

    pub fn set_coefficient(&mut self, coefficient: f64) {
        if self.params.coefficient != coefficient {
            self.params.coefficient = coefficient;
            self.rerun();
        }
    }

    pub fn set_category(&mut self, category: GroupingColumn) {
        if self.params.category != category {
            self.params.category = category;
            self.rerun();
        }
    }

    /// Spreadsheet of the last run's filtered rows; `None` before any run.
    pub fn export(&self) -> Result<Option<ExportFile>> {
        export_filtered(self.last_run.as_ref().map(|run| &run.filtered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::inventory_columns;
    use crate::data::model::CellValue;

    fn dataset() -> InventoryTable {
        let columns = inventory_columns(&["2023-01"]);
        let row = |line: &str, cov: f64| {
            let mut r = vec![CellValue::String("x".into()); columns.len()];
            r[0] = CellValue::String(line.into());
            r[13] = CellValue::Float(cov);
            r[14] = CellValue::Integer(1);
            r
        };
        InventoryTable::from_records(columns.clone(), vec![row("B", 2.0), row("A", 3.0)]).unwrap()
    }

    fn prop_orders(state: &DashboardState) -> Vec<CellValue> {
        state
            .last_run
            .as_ref()
            .unwrap()
            .filtered
            .column_values(PROP_ORDER)
            .cloned()
            .collect()
    }

    #[test]
    fn export_before_any_run_is_suppressed() {
        let state = DashboardState::new(&AppConfig::default());
        assert!(state.export().unwrap().is_none());
    }

    #[test]
    fn loading_selects_first_line_and_runs() {
        let mut state = DashboardState::new(&AppConfig::default());
        state.set_dataset(dataset());
        assert_eq!(state.product_lines, vec!["B".to_string(), "A".to_string()]);
        assert_eq!(state.params.product_line, "B");
        assert_eq!(state.params.coefficient, 75.0);
        assert_eq!(prop_orders(&state), vec![CellValue::Float(149.0)]);
    }

    #[test]
    fn input_changes_rerun_the_pipeline() {
        let mut state = DashboardState::new(&AppConfig::default());
        state.set_dataset(dataset());
        state.set_product_line("A".into());
        state.set_coefficient(10.0);
        assert_eq!(prop_orders(&state), vec![CellValue::Float(29.0)]);

        state.set_category(GroupingColumn::Gender);
        let run = state.last_run.as_ref().unwrap();
        assert_eq!(run.dashboard.table.columns[0].id, "UDF_GENDER");
    }

    #[test]
    fn export_follows_the_last_run() {
        let mut state = DashboardState::new(&AppConfig::default());
        state.set_dataset(dataset());
        state.set_product_line("A".into());
        let file = state.export().unwrap().unwrap();
        assert_eq!(file.file_name, "download_data.xlsx");
        assert!(!file.bytes.is_empty());
    }

    #[test]
    fn sessions_do_not_share_the_filtered_set() {
        let mut first = DashboardState::new(&AppConfig::default());
        let second = DashboardState::new(&AppConfig::default());
        first.set_dataset(dataset());
        assert!(first.export().unwrap().is_some());
        assert!(second.export().unwrap().is_none());
    }
}

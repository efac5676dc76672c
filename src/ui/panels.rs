use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::GroupingColumn;
use crate::report::COEFFICIENT_RANGE;
use crate::report::export::EXPORT_FILE_NAME;
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Left side panel – inputs and summary table
// ---------------------------------------------------------------------------

/// Render the left panel: product line, coefficient, category, table.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState) {
    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Product line ----
    ui.heading("Product Line");
    let lines = state.product_lines.clone();
    let current_line = state.params.product_line.clone();
    egui::ComboBox::from_id_salt("productline")
        .selected_text(&current_line)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for line in &lines {
                if ui.selectable_label(current_line == *line, line).clicked() {
                    state.set_product_line(line.clone());
                }
            }
        });
    ui.add_space(8.0);

    // ---- Proposed-order coefficient ----
    ui.heading("Prop Order");
    let mut coefficient = state.params.coefficient;
    let slider = egui::Slider::new(&mut coefficient, COEFFICIENT_RANGE).step_by(5.0);
    if ui.add(slider).changed() {
        state.set_coefficient(coefficient);
    }
    ui.add_space(8.0);

    // ---- Category ----
    ui.heading("Category");
    let current_category = state.params.category;
    egui::ComboBox::from_id_salt("category")
        .selected_text(current_category.as_str())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for category in GroupingColumn::ALL {
                if ui
                    .selectable_label(current_category == category, category.as_str())
                    .clicked()
                {
                    state.set_category(category);
                }
            }
        });
    ui.separator();

    summary_table(ui, state);
}

/// Render the summary table of the last run.
fn summary_table(ui: &mut Ui, state: &DashboardState) {
    let Some(run) = &state.last_run else {
        return;
    };
    let table = &run.dashboard.table;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0), table.columns.len())
        .header(22.0, |mut header| {
            for column in &table.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(&column.name);
                });
            }
        })
        .body(|mut body| {
            for row_idx in 0..table.rows.len() {
                body.row(18.0, |mut row| {
                    for (i, column) in table.columns.iter().enumerate() {
                        row.col(|ui: &mut Ui| {
                            let text = table.cell(row_idx, &column.id);
                            if i == 0 {
                                ui.label(text);
                            } else {
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui: &mut Ui| ui.label(text),
                                );
                            }
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(run)) = (&state.dataset, &state.last_run) {
            ui.label(format!(
                "{} records loaded, {} in {}",
                ds.len(),
                run.filtered.len(),
                state.params.product_line
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// Render the export button.
pub fn download_button(ui: &mut Ui, state: &mut DashboardState) {
    if ui.button("Download data").clicked() {
        save_export_dialog(state);
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut DashboardState) {
    let file = rfd::FileDialog::new()
        .set_title("Open inventory data")
        .add_filter("Supported files", &["xlsx", "xlsm", "xls", "ods", "csv", "json", "parquet", "pq"])
        .add_filter("Spreadsheets", &["xlsx", "xlsm", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records with columns {:?}",
                    dataset.len(),
                    dataset.columns
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn save_export_dialog(state: &mut DashboardState) {
    let export = match state.export() {
        Ok(Some(export)) => export,
        Ok(None) => return,
        Err(e) => {
            log::error!("Failed to build export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
            return;
        }
    };

    let target = rfd::FileDialog::new()
        .set_title("Download data")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("Excel", &["xlsx"])
        .save_file();

    if let Some(path) = target {
        if let Err(e) = std::fs::write(&path, &export.bytes) {
            log::error!("Failed to write {}: {e}", path.display());
            state.status_message = Some(format!("Error: {e}"));
        } else {
            log::info!("Saved {} to {}", export.file_name, path.display());
            state.status_message = None;
        }
    }
}

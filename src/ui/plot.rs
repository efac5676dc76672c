use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::series_color;
use crate::report::chart;
use crate::state::DashboardState;

const PLOT_HEIGHT: f32 = 320.0;
/// Fraction of each category slot covered by its group of bars.
const GROUP_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Charts (central panel)
// ---------------------------------------------------------------------------

/// Render the bar and line charts of the last run.
pub fn charts(ui: &mut Ui, state: &DashboardState) {
    let Some(run) = &state.last_run else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view the dashboard  (File → Open…)");
        });
        return;
    };

    summary_bars(ui, &run.dashboard.bar_chart);
    ui.add_space(12.0);
    sales_line(ui, &run.dashboard.line_chart);
}

/// Label of the category at integer position `mark`, blank between ticks.
fn category_label(labels: &[String], mark: GridMark) -> String {
    let idx = mark.value.round();
    if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Grouped bars: one colour per series, side by side within each category.
fn summary_bars(ui: &mut Ui, payload: &chart::BarChart) {
    ui.heading(&payload.title);

    let labels: Vec<String> = payload
        .series
        .first()
        .map(|s| s.x.clone())
        .unwrap_or_default();
    let n_series = payload.series.len().max(1);
    let bar_width = GROUP_WIDTH / n_series as f64;

    Plot::new("summary_plot")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark))
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (s_idx, series) in payload.series.iter().enumerate() {
                let offset = (s_idx as f64 + 0.5) * bar_width - GROUP_WIDTH / 2.0;
                let bars: Vec<Bar> = series
                    .y
                    .iter()
                    .enumerate()
                    .map(|(g_idx, &value)| {
                        Bar::new(g_idx as f64 + offset, value)
                            .width(bar_width)
                            .name(format!("{} – {}", series.x[g_idx], series.name))
                    })
                    .collect();

                let chart = BarChart::new(bars)
                    .name(&series.name)
                    .color(series_color(s_idx, payload.series.len()));
                plot_ui.bar_chart(chart);
            }
        });
}

/// Single line with markers across the monthly buckets.
fn sales_line(ui: &mut Ui, payload: &chart::LineChart) {
    ui.heading(&payload.title);

    let series = &payload.series;
    if series.is_empty() {
        ui.label("No monthly columns in this dataset.");
    }

    let labels = series.x.clone();
    let coords: Vec<[f64; 2]> = series
        .y
        .iter()
        .enumerate()
        .map(|(i, &v)| [i as f64, v])
        .collect();

    Plot::new("timeline_plot")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(&payload.x_label)
        .y_axis_label(&payload.y_label)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark))
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let line = Line::new(PlotPoints::from(coords.clone()))
                .name(&series.name)
                .color(Color32::LIGHT_BLUE)
                .width(2.0);
            let markers = Points::new(PlotPoints::from(coords))
                .name(&series.name)
                .color(Color32::LIGHT_BLUE)
                .radius(3.0);
            plot_ui.line(line);
            plot_ui.points(markers);
        });
}

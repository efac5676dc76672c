use serde::Serialize;

use crate::data::aggregate::Summary;
use crate::data::model::SUMMED_FIELDS;

pub const BAR_CHART_TITLE: &str = "Summary per Product Line";
pub const LINE_CHART_TITLE: &str = "Sales per Product Line";
pub const LINE_X_LABEL: &str = "Mes";
pub const LINE_Y_LABEL: &str = "Suma de valores";

// ---------------------------------------------------------------------------
// Chart payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Bar,
    LinesMarkers,
}

/// One named series of categorical x values and raw numeric y values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Series,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// One bar series per summed field, x = group labels in summary order.
pub fn bar_chart(summary: &Summary) -> BarChart {
    let labels: Vec<String> = summary.rows.iter().map(|r| r.key.to_string()).collect();
    let series = SUMMED_FIELDS
        .iter()
        .enumerate()
        .map(|(i, field)| Series {
            name: field.to_string(),
            kind: SeriesKind::Bar,
            x: labels.clone(),
            y: summary.rows.iter().map(|r| r.totals[i]).collect(),
        })
        .collect();

    BarChart {
        title: BAR_CHART_TITLE.to_string(),
        series,
    }
}

/// A single series: each time bucket summed across all groups.
pub fn line_chart(summary: &Summary) -> LineChart {
    LineChart {
        title: LINE_CHART_TITLE.to_string(),
        x_label: LINE_X_LABEL.to_string(),
        y_label: LINE_Y_LABEL.to_string(),
        series: Series {
            name: LINE_Y_LABEL.to_string(),
            kind: SeriesKind::LinesMarkers,
            x: summary.buckets.clone(),
            y: summary.bucket_grand_totals(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::AggregatedRow;
    use crate::data::model::{CellValue, GroupingColumn};

    fn group(key: &str, totals: [f64; 5], buckets: Vec<f64>) -> AggregatedRow {
        AggregatedRow {
            key: CellValue::String(key.into()),
            totals,
            bucket_totals: buckets,
        }
    }

    fn summary() -> Summary {
        Summary {
            category: GroupingColumn::Category2,
            buckets: vec!["2023-01".into(), "2023-02".into()],
            rows: vec![
                group("b", [1.0, 2.0, 3.0, 4.0, 1500.5], vec![10.0, 20.0]),
                group("a", [5.0, 6.0, 7.0, 8.0, -2.0], vec![1.0, 2.0]),
            ],
        }
    }

    #[test]
    fn bar_chart_has_one_series_per_field() {
        let chart = bar_chart(&summary());
        assert_eq!(chart.title, "Summary per Product Line");
        let names: Vec<_> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, SUMMED_FIELDS.to_vec());
        for series in &chart.series {
            assert_eq!(series.x, vec!["b".to_string(), "a".to_string()]);
            assert_eq!(series.kind, SeriesKind::Bar);
        }
        assert_eq!(chart.series[4].y, vec![1500.5, -2.0]);
    }

    #[test]
    fn line_chart_sums_buckets_across_groups() {
        let chart = line_chart(&summary());
        assert_eq!(chart.title, "Sales per Product Line");
        assert_eq!(chart.x_label, "Mes");
        assert_eq!(chart.y_label, "Suma de valores");
        assert_eq!(chart.series.x, vec!["2023-01".to_string(), "2023-02".to_string()]);
        assert_eq!(chart.series.y, vec![11.0, 22.0]);
    }

    #[test]
    fn no_buckets_gives_empty_line_series() {
        let mut s = summary();
        s.buckets.clear();
        for row in &mut s.rows {
            row.bucket_totals.clear();
        }
        let chart = line_chart(&s);
        assert!(chart.series.is_empty());
        assert!(chart.series.y.is_empty());
    }

    #[test]
    fn empty_summary_gives_empty_bars() {
        let mut s = summary();
        s.rows.clear();
        let chart = bar_chart(&s);
        assert_eq!(chart.series.len(), 5);
        assert!(chart.series.iter().all(Series::is_empty));
        assert_eq!(line_chart(&s).series.y, vec![0.0, 0.0]);
    }
}

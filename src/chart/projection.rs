use super::scale::LinearScale;
use crate::config::ChartConfig;
use crate::data::filter::records_for_category;
use crate::data::model::Record;

// ---------------------------------------------------------------------------
// Projection – everything the chart surface needs for one selection
// ---------------------------------------------------------------------------

/// Hover label attached to a plotted point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLabel {
    pub year: f64,
    /// `None` when the record had no metric; such points sit on the baseline.
    pub value: Option<f64>,
}

impl PointLabel {
    /// Tooltip text, e.g. `Year: 2000, Inflation: 3%`.
    pub fn describe(&self, metric: &str, unit: &str) -> String {
        match self.value {
            Some(v) => format!("Year: {}, {metric}: {v}{unit}", self.year),
            None => format!("Year: {}, {metric}: n/a", self.year),
        }
    }
}

/// One plotted point in inner-plot pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub label: PointLabel,
}

/// Derived view of the selected category. Recomputed from scratch on every
/// state change; never mutated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    /// Selection this projection was built for.
    pub category: Option<String>,
    /// Number of records matching the selection.
    pub matched: usize,
    /// `None` when no point could be plotted.
    pub x_scale: Option<LinearScale>,
    pub y_scale: Option<LinearScale>,
    /// One per matched record with a year, in filtered order.
    pub points: Vec<PlotPoint>,
    /// Polyline through `points` in the same order. A single point gives a
    /// one-vertex, zero-length line.
    pub line: Option<Vec<[f64; 2]>>,
}

/// Filter `records` by `selection` and lay the matches out on `chart`.
///
/// A record without a metric is drawn on the zero baseline. A record
/// without a numeric year has no x position and is left out.
pub fn project(records: &[Record], selection: Option<&str>, chart: &ChartConfig) -> Projection {
    let matches = records_for_category(records, selection);
    let labels: Vec<PointLabel> = matches
        .iter()
        .filter_map(|r| Some(PointLabel { year: r.year?, value: r.value }))
        .collect();

    let mut projection = Projection {
        category: selection.map(str::to_string),
        matched: matches.len(),
        ..Projection::default()
    };
    if labels.is_empty() {
        return projection;
    }

    let (min_year, max_year) = labels
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), l| {
            (lo.min(l.year), hi.max(l.year))
        });
    let max_value = labels
        .iter()
        .filter_map(|l| l.value)
        .reduce(f64::max)
        .unwrap_or(0.0);

    // Inflation charts are anchored at zero, whatever the data minimum.
    let x_scale = LinearScale::new([min_year, max_year], [0.0, chart.inner_width()]);
    let y_scale = LinearScale::new([0.0, max_value], [chart.inner_height(), 0.0]);

    let points: Vec<PlotPoint> = labels
        .into_iter()
        .map(|label| PlotPoint {
            x: x_scale.apply(label.year),
            y: y_scale.apply(label.value.unwrap_or(0.0)),
            label,
        })
        .collect();

    projection.line = Some(points.iter().map(|p| [p.x, p.y]).collect());
    projection.points = points;
    projection.x_scale = Some(x_scale);
    projection.y_scale = Some(y_scale);
    projection
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the point closest to `pos` (inner-plot coordinates), if it
    /// lies within `tolerance` pixels.
    pub fn hit_test(&self, pos: [f64; 2], tolerance: f64) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, (p.x - pos[0]).hypot(p.y - pos[1])))
            .filter(|&(_, d)| d <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnSpec;
    use crate::data::loader::parse_csv;

    const SAMPLE: &str = "Country,Year,Inflation\nX,2000,3.4\nX,2001,-1.6\nY,2000,9.9\n";

    fn sample() -> Vec<Record> {
        parse_csv(SAMPLE, &ColumnSpec::default()).unwrap().records
    }

    #[test]
    fn sample_projection_for_x() {
        let chart = ChartConfig::default();
        let p = project(&sample(), Some("X"), &chart);
        assert_eq!(p.points.len(), 2);
        assert_eq!(p.matched, 2);
        assert_eq!(p.y_scale.unwrap().domain, [0.0, 3.0]);
        assert_eq!(p.x_scale.unwrap().domain, [2000.0, 2001.0]);

        let labels: Vec<(f64, Option<f64>)> = p
            .points
            .iter()
            .map(|pt| (pt.label.year, pt.label.value))
            .collect();
        assert_eq!(labels, vec![(2000.0, Some(3.0)), (2001.0, Some(-2.0))]);

        // First point: left edge, top of the plot (value == y max).
        assert_eq!(p.points[0].x, 0.0);
        assert_eq!(p.points[0].y, 0.0);
        // Second point: right edge, below the zero baseline.
        assert_eq!(p.points[1].x, chart.inner_width());
        assert!(p.points[1].y > chart.inner_height());
    }

    #[test]
    fn line_follows_point_order() {
        let p = project(&sample(), Some("X"), &ChartConfig::default());
        let line = p.line.clone().unwrap();
        let from_points: Vec<[f64; 2]> = p.points.iter().map(|pt| [pt.x, pt.y]).collect();
        assert_eq!(line, from_points);
    }

    #[test]
    fn projection_is_idempotent() {
        let records = sample();
        let chart = ChartConfig::default();
        let first = project(&records, Some("X"), &chart);
        let second = project(&records, Some("X"), &chart);
        assert_eq!(first, second);
    }

    #[test]
    fn absent_category_projects_empty() {
        let p = project(&sample(), Some("Atlantis"), &ChartConfig::default());
        assert!(p.is_empty());
        assert!(p.line.is_none());
        assert!(p.x_scale.is_none() && p.y_scale.is_none());
        assert_eq!(p.matched, 0);
    }

    #[test]
    fn no_selection_projects_empty() {
        let p = project(&sample(), None, &ChartConfig::default());
        assert!(p.is_empty());
        assert_eq!(p.category, None);
    }

    #[test]
    fn single_record_gives_zero_length_line() {
        let chart = ChartConfig::default();
        let p = project(&sample(), Some("Y"), &chart);
        assert_eq!(p.points.len(), 1);
        assert_eq!(p.line.as_ref().map(Vec::len), Some(1));
        // Degenerate x domain lands in the middle.
        assert_eq!(p.points[0].x, chart.inner_width() / 2.0);
        assert_eq!(p.points[0].y, 0.0);
    }

    #[test]
    fn blank_metric_sits_on_baseline() {
        let chart = ChartConfig::default();
        let text = "Country,Year,Inflation\nX,2000,5\nX,2001,\nX,2002,1\n";
        let records = parse_csv(text, &ColumnSpec::default()).unwrap().records;
        let p = project(&records, Some("X"), &chart);
        assert_eq!(p.matched, 3);
        assert_eq!(p.points.len(), 3);
        assert_eq!(p.y_scale.unwrap().domain, [0.0, 5.0]);
        assert_eq!(p.points[1].y, chart.inner_height());
        assert_eq!(p.points[1].label.value, None);
        assert_eq!(p.line.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    fn single_blank_metric_still_plots_one_point() {
        let chart = ChartConfig::default();
        let text = "Country,Year,Inflation\nZ,2000,\n";
        let records = parse_csv(text, &ColumnSpec::default()).unwrap().records;
        let p = project(&records, Some("Z"), &chart);
        assert_eq!(p.matched, 1);
        assert_eq!(p.points.len(), 1);
        assert_eq!(p.line.as_ref().map(Vec::len), Some(1));
        // Both domains are degenerate, so the point lands mid-plot.
        assert_eq!(p.y_scale.unwrap().domain, [0.0, 0.0]);
        assert_eq!(p.points[0].x, chart.inner_width() / 2.0);
        assert_eq!(p.points[0].y, chart.inner_height() / 2.0);
    }

    #[test]
    fn record_without_year_has_no_point() {
        let text = "Country,Year,Inflation\nX,2000,5\nX,soon,2\n";
        let records = parse_csv(text, &ColumnSpec::default()).unwrap().records;
        let p = project(&records, Some("X"), &ChartConfig::default());
        assert_eq!(p.matched, 2);
        assert_eq!(p.points.len(), 1);
    }

    #[test]
    fn hit_test_picks_nearest_within_tolerance() {
        let p = project(&sample(), Some("X"), &ChartConfig::default());
        let second = p.points[1];
        assert_eq!(p.hit_test([second.x + 2.0, second.y - 1.0], 6.0), Some(1));
        assert_eq!(p.hit_test([1.0, 1.0], 6.0), Some(0));
        assert_eq!(p.hit_test([365.0, 175.0], 6.0), None);
    }

    #[test]
    fn label_text_matches_tooltip_format() {
        let label = PointLabel { year: 2000.0, value: Some(-2.0) };
        assert_eq!(label.describe("Inflation", "%"), "Year: 2000, Inflation: -2%");
        let blank = PointLabel { year: 2001.0, value: None };
        assert_eq!(blank.describe("Inflation", "%"), "Year: 2001, Inflation: n/a");
    }
}

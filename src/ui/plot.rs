use eframe::egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};

use crate::chart::scale::LinearScale;
use crate::state::{AppState, LoadStatus};

const STEEL_BLUE: Color32 = Color32::from_rgb(70, 130, 180);
const TICK_LEN: f32 = 6.0;
const HOVER_TOLERANCE: f64 = 6.0;

// ---------------------------------------------------------------------------
// Inflation chart (central panel)
// ---------------------------------------------------------------------------

/// Render the projection for the current selection.
pub fn inflation_chart(ui: &mut Ui, state: &AppState) {
    match &state.status {
        LoadStatus::Loading => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Loading...");
            });
            return;
        }
        LoadStatus::Failed(_) => return,
        LoadStatus::Loaded => {}
    }

    let projection = &state.projection;
    if projection.is_empty() {
        let text = match &projection.category {
            Some(c) if projection.matched > 0 => format!("No plottable data for {c}"),
            Some(c) => format!("No records for {c}"),
            None => "No data available".to_string(),
        };
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(text);
        });
        return;
    }

    let chart = &state.config.chart;
    let size = Vec2::new(chart.width as f32, chart.height as f32);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min + Vec2::new(chart.margin.left as f32, chart.margin.top as f32);
    let to_screen = |x: f64, y: f64| Pos2::new(origin.x + x as f32, origin.y + y as f32);

    let text_color = ui.visuals().text_color();
    let axis_stroke = Stroke::new(1.0, text_color);
    let font = FontId::proportional(10.0);

    // ---- Axes ----
    let inner_w = chart.inner_width();
    let inner_h = chart.inner_height();
    if let Some(x_scale) = &projection.x_scale {
        painter.line_segment([to_screen(0.0, inner_h), to_screen(inner_w, inner_h)], axis_stroke);
        for (value, label) in x_scale.tick_labels(chart.x_ticks) {
            let at = to_screen(x_scale.apply(value), inner_h);
            painter.line_segment([at, at + Vec2::new(0.0, TICK_LEN)], axis_stroke);
            painter.text(
                at + Vec2::new(0.0, TICK_LEN + 2.0),
                Align2::CENTER_TOP,
                label,
                font.clone(),
                text_color,
            );
        }
    }
    if let Some(y_scale) = &projection.y_scale {
        painter.line_segment([to_screen(0.0, 0.0), to_screen(0.0, inner_h)], axis_stroke);
        for (value, label) in y_ticks(y_scale, chart.y_ticks) {
            let at = to_screen(0.0, y_scale.apply(value));
            painter.line_segment([at, at - Vec2::new(TICK_LEN, 0.0)], axis_stroke);
            painter.text(
                at - Vec2::new(TICK_LEN + 2.0, 0.0),
                Align2::RIGHT_CENTER,
                label,
                font.clone(),
                text_color,
            );
        }
    }

    // ---- Line + points ----
    if let Some(line) = &projection.line {
        let pts: Vec<Pos2> = line.iter().map(|&[x, y]| to_screen(x, y)).collect();
        if pts.len() > 1 {
            painter.add(Shape::line(pts, Stroke::new(chart.line_width as f32, STEEL_BLUE)));
        }
    }
    for p in &projection.points {
        painter.circle_filled(to_screen(p.x, p.y), chart.point_radius as f32, STEEL_BLUE);
    }

    // ---- Tooltip ----
    let hovered = response.hover_pos().and_then(|pos| {
        let local = pos - origin;
        projection.hit_test([local.x as f64, local.y as f64], HOVER_TOLERANCE)
    });
    if let Some(idx) = hovered {
        let columns = &state.config.columns;
        let text = projection.points[idx]
            .label
            .describe(&columns.metric, &columns.metric_unit);
        response.on_hover_text_at_pointer(text);
    }
}

/// Y ticks; a zero-height domain (all values zero) still gets its baseline.
fn y_ticks(scale: &LinearScale, count: usize) -> Vec<(f64, String)> {
    let ticks = scale.tick_labels(count);
    if ticks.is_empty() {
        vec![(0.0, "0".to_string())]
    } else {
        ticks
    }
}

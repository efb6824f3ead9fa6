use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{PieChart, ScatterChart, OUTCOME_AXIS_LABEL, PAYLOAD_AXIS_LABEL};
use crate::color::{outcome_color, ColorMap};

/// Inner radius of the donut relative to the outer one.
const HOLE: f64 = 0.5;

/// Arc resolution of the donut, in radians per segment.
const SEGMENT: f64 = TAU / 180.0;

fn placeholder(ui: &mut Ui, title: &str, height: f32) {
    ui.heading(title);
    ui.allocate_ui(eframe::egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches match the current selection.");
        });
    });
}

// ---------------------------------------------------------------------------
// Success proportion (donut) chart
// ---------------------------------------------------------------------------

/// Render the outcome proportions as a donut, starting at twelve o'clock and
/// running clockwise.
pub fn pie_chart(ui: &mut Ui, chart: &PieChart, height: f32) {
    if chart.is_empty() {
        placeholder(ui, &chart.title, height);
        return;
    }
    ui.heading(&chart.title);

    Plot::new("success_pie_chart")
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for slice in &chart.slices {
                let color = outcome_color(slice.outcome);
                let name = format!("{} ({})", slice.outcome, slice.outcome.label());
                let end = start + slice.fraction;

                // Annular sectors are not convex; fill them as thin quads.
                for (a0, a1) in arc_segments(start, end) {
                    let quad = vec![
                        polar(1.0, a0),
                        polar(1.0, a1),
                        polar(HOLE, a1),
                        polar(HOLE, a0),
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(quad))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(0.5, color)),
                    );
                }

                let mid = angle((start + end) / 2.0);
                let [x, y] = polar((1.0 + HOLE) / 2.0, mid);
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(format!("{:.1}%", slice.fraction * 100.0)).strong(),
                    )
                    .color(Color32::WHITE),
                );
                start = end;
            }
        });
}

/// Fraction of the full circle → plot angle (0 at the top, clockwise).
fn angle(fraction: f64) -> f64 {
    FRAC_PI_2 - fraction * TAU
}

fn polar(r: f64, theta: f64) -> [f64; 2] {
    [r * theta.cos(), r * theta.sin()]
}

/// Split the arc between two circle fractions into segments of at most
/// [`SEGMENT`] radians, as pairs of plot angles.
fn arc_segments(start: f64, end: f64) -> Vec<(f64, f64)> {
    let span = (end - start) * TAU;
    let n = ((span / SEGMENT - 1e-9).ceil() as usize).max(1);
    (0..n)
        .map(|i| {
            let f0 = start + (end - start) * i as f64 / n as f64;
            let f1 = start + (end - start) * (i + 1) as f64 / n as f64;
            (angle(f0), angle(f1))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Payload vs. outcome scatter chart
// ---------------------------------------------------------------------------

/// Render payload mass against outcome, one colour per booster category.
pub fn scatter_chart(ui: &mut Ui, chart: &ScatterChart, color_map: &ColorMap, height: f32) {
    if chart.is_empty() {
        placeholder(ui, &chart.title, height);
        return;
    }
    ui.heading(&chart.title);

    Plot::new("success_payload_scatter_chart")
        .height(height)
        .legend(Legend::default())
        .x_axis_label(PAYLOAD_AXIS_LABEL)
        .y_axis_label(OUTCOME_AXIS_LABEL)
        .include_y(-0.25)
        .include_y(1.25)
        .include_x(0.0)
        .y_axis_formatter(|mark, _range| {
            if mark.value == 0.0 || mark.value == 1.0 {
                format!("{}", mark.value)
            } else {
                String::new()
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points = Points::new(PlotPoints::new(series.points.clone()))
                    .name(&series.booster_category)
                    .color(color_map.color_for(&series.booster_category))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(5.0);
                plot_ui.points(points);
            }
        });
}

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use launch_dash::views::{ProportionChartSpec, ScatterChartSpec};

use crate::color::ColorMap;

/// Segments per full circle when approximating pie wedges.
const PIE_RESOLUTION: usize = 128;

// ---------------------------------------------------------------------------
// Proportion chart (pie)
// ---------------------------------------------------------------------------

/// Render the proportion view as a pie, one wedge per slice.
pub fn proportion_chart(ui: &mut Ui, spec: &ProportionChartSpec, colors: &ColorMap, height: f32) {
    ui.strong(&spec.title);

    if spec.slices.is_empty() {
        ui.label("No launches match the selected site.");
        return;
    }

    Plot::new("proportion_chart")
        .legend(Legend::default())
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            // Start at 12 o'clock and go clockwise.
            let mut start = TAU / 4.0;
            for slice in &spec.slices {
                let sweep = slice.fraction * TAU;
                let end = start - sweep;
                let color = colors.color_for(&slice.label);

                plot_ui.polygon(
                    Polygon::new(wedge(start, end))
                        .name(format!("{} ({})", slice.label, slice.count))
                        .fill_color(color.gamma_multiply(0.85))
                        .stroke((1.0, Color32::WHITE)),
                );

                let mid = (start + end) / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    RichText::new(format!("{:.1}%", slice.fraction * 100.0)).strong(),
                ));

                start = end;
            }
        });
}

/// Closed outline of a unit-circle wedge from `start` to `end` (radians).
fn wedge(start: f64, end: f64) -> PlotPoints<'static> {
    let steps = (((start - end).abs() / TAU) * PIE_RESOLUTION as f64).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = start + (end - start) * i as f64 / steps as f64;
        points.push([angle.cos(), angle.sin()]);
    }
    PlotPoints::new(points)
}

// ---------------------------------------------------------------------------
// Correlation chart (scatter)
// ---------------------------------------------------------------------------

/// Render payload mass vs. outcome, one series per booster category.
pub fn scatter_chart(ui: &mut Ui, spec: &ScatterChartSpec, colors: &ColorMap, height: f32) {
    ui.strong(&spec.title);

    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for point in &spec.points {
        series
            .entry(point.booster_category.as_str())
            .or_default()
            .push([point.payload_mass, point.outcome.class() as f64]);
    }

    Plot::new("correlation_chart")
        .legend(Legend::default())
        .height(height)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, points) in series {
                plot_ui.points(
                    Points::new(PlotPoints::new(points))
                        .name(category)
                        .color(colors.color_for(category))
                        .radius(4.0),
                );
            }
        });
}

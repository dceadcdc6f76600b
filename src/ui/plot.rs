use std::f32::consts::TAU;

use eframe::egui::{Align2, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::color::generate_palette;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Success pie chart (top half of the central panel)
// ---------------------------------------------------------------------------

/// Render the success pie chart from the cached pie data.
pub fn success_pie(ui: &mut Ui, state: &AppState) {
    let spec = &state.pie;
    ui.heading(&spec.title);

    let total = spec.total();
    if total == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches match the current selection.");
        });
        return;
    }

    let desired = Vec2::new(ui.available_width(), ui.available_height());
    let (response, painter) = ui.allocate_painter(desired, Sense::hover());
    let rect = response.rect;

    let radius = 0.45 * rect.height().min(rect.width() * 0.6);
    let center = Pos2::new(rect.left() + rect.width() * 0.32, rect.center().y);
    let colors = generate_palette(spec.slices.len());

    // Wedges, clockwise from 12 o'clock.  Triangle fans keep every polygon
    // convex regardless of slice angle.
    let mut angle = -TAU / 4.0;
    for (slice, color) in spec.slices.iter().zip(&colors) {
        let sweep = (slice.value as f32 / total as f32) * TAU;
        let steps = ((sweep / TAU) * 64.0).ceil().max(1.0) as usize;
        let mut prev = arc_point(center, radius, angle);
        for i in 1..=steps {
            let next = arc_point(center, radius, angle + sweep * i as f32 / steps as f32);
            painter.add(Shape::convex_polygon(
                vec![center, prev, next],
                *color,
                Stroke::NONE,
            ));
            prev = next;
        }
        angle += sweep;
    }

    // Legend with counts and percentages to the right of the pie.
    let line_height = 18.0;
    let legend_x = center.x + radius + 24.0;
    let mut legend_y = rect.center().y - spec.slices.len() as f32 * line_height / 2.0;
    for (slice, color) in spec.slices.iter().zip(&colors) {
        let pct = 100.0 * slice.value as f64 / total as f64;
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(legend_x, legend_y + 3.0), Vec2::splat(12.0)),
            2.0,
            *color,
        );
        painter.text(
            Pos2::new(legend_x + 18.0, legend_y),
            Align2::LEFT_TOP,
            format!("{}: {} ({pct:.1}%)", slice.label, slice.value),
            FontId::proportional(14.0),
            ui.visuals().text_color(),
        );
        legend_y += line_height;
    }
}

fn arc_point(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + radius * Vec2::new(angle.cos(), angle.sin())
}

// ---------------------------------------------------------------------------
// Payload / outcome scatter chart (bottom half)
// ---------------------------------------------------------------------------

/// Render the payload scatter chart from the cached scatter data.
pub fn payload_scatter_plot(ui: &mut Ui, state: &AppState) {
    let spec = &state.scatter;
    ui.heading(&spec.title);

    // One series per booster category so the plot legend doubles as the
    // colour key.  Categories keep their first-appearance order.
    let mut series: Vec<(String, Vec<[f64; 2]>)> = Vec::new();
    for point in &spec.points {
        let xy = [point.payload_kg, f64::from(point.outcome.class_value())];
        match series
            .iter_mut()
            .find(|(category, _)| *category == point.booster_category)
        {
            Some((_, points)) => points.push(xy),
            None => series.push((point.booster_category.clone(), vec![xy])),
        }
    }

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Launch Outcome")
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, points) in series {
                let color = state.color_map.color_for(&category);
                plot_ui.points(
                    Points::new(PlotPoints::new(points))
                        .name(&category)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .radius(3.5),
                );
            }
        });
}

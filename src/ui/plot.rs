use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::chart::layout::Slice;
use crate::state::ViewerState;

/// Arc resolution of the on-screen wedges, in degrees per segment.
const ARC_STEP: f32 = 1.0;

// ---------------------------------------------------------------------------
// Pie chart (central panel)
// ---------------------------------------------------------------------------

/// Outline of a slice, shifted by `offset` (radius units).
fn wedge_points(slice: &Slice, offset: (f32, f32)) -> PlotPoints<'static> {
    let (ox, oy) = slice.origin();
    let (cx, cy) = ((ox + offset.0) as f64, (oy + offset.1) as f64);
    let steps = (slice.sweep / ARC_STEP).ceil().max(1.0) as usize;

    let arc = (0..=steps).map(|i| {
        let angle = (slice.start_angle + slice.sweep * i as f32 / steps as f32).to_radians() as f64;
        [cx + angle.cos(), cy + angle.sin()]
    });

    if slice.is_full_circle() {
        // drop the closing point, it repeats the first
        arc.take(steps).collect()
    } else {
        std::iter::once([cx, cy]).chain(arc).collect()
    }
}

/// Render the status pie in the central panel.
pub fn status_pie(ui: &mut Ui, state: &ViewerState) {
    let style = &state.style;

    Plot::new("status_pie")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if style.shadow {
                for slice in &state.chart.slices {
                    let shadow = Color32::from_black_alpha((style.shadow_alpha * 255.0) as u8);
                    plot_ui.polygon(
                        Polygon::new(wedge_points(slice, style.shadow_offset))
                            .fill_color(shadow)
                            .stroke(Stroke::NONE),
                    );
                }
            }

            for slice in &state.chart.slices {
                plot_ui.polygon(
                    Polygon::new(wedge_points(slice, (0.0, 0.0)))
                        .name(&slice.label)
                        .fill_color(slice.color)
                        .stroke(Stroke::new(1.0, slice.color)),
                );
            }

            for slice in &state.chart.slices {
                let (lx, ly) = slice.point_at(style.label_distance);
                plot_ui.text(Text::new(
                    PlotPoint::new(lx, ly),
                    RichText::new(&slice.label).color(style.label_color).size(15.0),
                ));

                if state.show_percentages {
                    let (px, py) = slice.point_at(style.percent_distance);
                    plot_ui.text(Text::new(
                        PlotPoint::new(px, py),
                        RichText::new(slice.percent_label())
                            .strong()
                            .color(style.percent_color)
                            .size(16.0),
                    ));
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(start_angle: f32, sweep: f32) -> Slice {
        Slice {
            label: "Pago".into(),
            count: 1,
            fraction: sweep / 360.0,
            start_angle,
            sweep,
            color: Color32::GREEN,
            explode: 0.0,
        }
    }

    #[test]
    fn partial_wedge_starts_at_its_origin() {
        let points = wedge_points(&slice(90.0, 90.0), (0.0, 0.0));
        let points = points.points();
        assert_eq!(points.len(), 92);
        assert_eq!((points[0].x, points[0].y), (0.0, 0.0));
        assert!((points[1].y - 1.0).abs() < 1e-6);
        assert!((points[91].x + 1.0).abs() < 1e-6);
    }

    #[test]
    fn full_circle_has_no_center_point() {
        let points = wedge_points(&slice(90.0, 360.0), (0.0, 0.0));
        let points = points.points();
        assert_eq!(points.len(), 360);
        assert!(points.iter().all(|p| ((p.x * p.x + p.y * p.y).sqrt() - 1.0).abs() < 1e-6));
    }
}

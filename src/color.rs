use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::chart::style::ChartStyle;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// First hue handed out to statuses without a fixed colour (blue), away from
/// the green and orange of the two known statuses.
const FIRST_EXTRA_HUE: f32 = 210.0;

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (FIRST_EXTRA_HUE + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.55, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: status label → Color32
// ---------------------------------------------------------------------------

/// Maps status labels to slice colours. Labels with a fixed colour in the
/// style keep it; the rest share an evenly spaced palette in slice order.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for `labels` (in slice order).
    pub fn new(labels: &[String], style: &ChartStyle) -> Self {
        let extra: Vec<&String> = labels
            .iter()
            .filter(|l| style.status_color(l).is_none())
            .collect();
        let palette = generate_palette(extra.len());

        let mut mapping: BTreeMap<String, Color32> = extra
            .into_iter()
            .zip(palette)
            .map(|(l, c)| (l.clone(), c))
            .collect();
        for label in labels {
            if let Some(c) = style.status_color(label) {
                mapping.insert(label.clone(), c);
            }
        }

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given status.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

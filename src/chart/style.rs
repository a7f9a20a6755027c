use eframe::egui::Color32;

use crate::config::{STATUS_PAID, STATUS_PENDING};

// ---------------------------------------------------------------------------
// Chart theme
// ---------------------------------------------------------------------------

/// Visual theme of the status chart. Sizes are in typographic points and
/// inches, converted to pixels with [`ChartStyle::px`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub dpi: u32,
    /// Figure size in inches (width, height) before trimming.
    pub figure_size: (f32, f32),
    pub background: Color32,

    pub title: String,
    pub title_size: f32,
    /// Gap between the title and the plot area, in points.
    pub title_pad: f32,
    pub title_color: Color32,

    /// Fixed slice colours keyed by status label.
    pub status_colors: Vec<(String, Color32)>,
    /// Pending label and how far its slice is pushed out (fraction of radius).
    pub exploded_status: String,
    pub explode_fraction: f32,
    /// Angle of the first slice edge, degrees counter-clockwise from 3 o'clock.
    pub start_angle: f32,

    pub percent_size: f32,
    pub percent_color: Color32,
    /// Radial position of percentages as a fraction of the radius.
    pub percent_distance: f32,
    pub label_size: f32,
    pub label_color: Color32,
    pub label_distance: f32,

    pub shadow: bool,
    /// Shadow shift in data units (radius = 1), right and up.
    pub shadow_offset: (f32, f32),
    pub shadow_alpha: f32,

    pub caption_size: f32,
    pub caption_color: Color32,
    pub caption_box: Color32,
    pub caption_box_alpha: f32,
    /// Caption centre height in data units (radius = 1, up is positive).
    pub caption_y: f32,

    /// Padding kept around the content when trimming, in inches.
    pub trim_pad: f32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            dpi: 300,
            figure_size: (10.0, 8.0),
            background: Color32::WHITE,

            title: "Distribuição Percentual dos Status de Pagamento".to_string(),
            title_size: 16.0,
            title_pad: 20.0,
            title_color: Color32::from_rgb(0x26, 0x26, 0x26),

            status_colors: vec![
                (STATUS_PAID.to_string(), Color32::from_rgb(0x66, 0xBB, 0x6A)),
                (STATUS_PENDING.to_string(), Color32::from_rgb(0xFF, 0x70, 0x43)),
            ],
            exploded_status: STATUS_PENDING.to_string(),
            explode_fraction: 0.1,
            start_angle: 90.0,

            percent_size: 12.0,
            percent_color: Color32::WHITE,
            percent_distance: 0.85,
            label_size: 11.0,
            label_color: Color32::BLACK,
            label_distance: 1.1,

            shadow: true,
            shadow_offset: (-0.02, -0.02),
            shadow_alpha: 0.5,

            caption_size: 12.0,
            caption_color: Color32::from_rgb(0x26, 0x26, 0x26),
            caption_box: Color32::WHITE,
            caption_box_alpha: 0.5,
            caption_y: -1.2,

            trim_pad: 0.1,
        }
    }
}

impl ChartStyle {
    /// Convert points to pixels at the style's resolution.
    pub fn px(&self, points: f32) -> f32 {
        points * self.dpi as f32 / 72.0
    }

    /// Figure size in whole pixels.
    pub fn figure_px(&self) -> (u32, u32) {
        let dpi = self.dpi as f32;
        (
            (self.figure_size.0 * dpi).round() as u32,
            (self.figure_size.1 * dpi).round() as u32,
        )
    }

    /// Fixed colour for a status label, if it has one.
    pub fn status_color(&self, label: &str) -> Option<Color32> {
        self.status_colors
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, c)| *c)
    }

    /// Caption text under the pie.
    pub fn caption(&self, total_rows: usize) -> String {
        format!("Total de Clientes Analisados: {total_rows}")
    }
}

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ab_glyph::{point, Font, FontArc, PxScale, ScaleFont};
use eframe::egui::{self, Color32};
use image::{Rgba, RgbaImage};

use super::layout::{PieChart, Slice};
use super::style::ChartStyle;
use crate::error::ChartError;

// ---------------------------------------------------------------------------
// Figure geometry
// ---------------------------------------------------------------------------

/// Plot area as fractions of the figure (left, bottom, right, top).
const PLOT_AREA: (f32, f32, f32, f32) = (0.125, 0.11, 0.9, 0.88);
/// Visible data range on each axis: the pie spans [-1.25, 1.25].
const DATA_SPAN: f32 = 2.5;

/// Maps pie coordinates (radius = 1, y up) onto figure pixels.
#[derive(Debug, Clone, Copy)]
pub struct PieFrame {
    pub center: (f32, f32),
    /// Pixels per radius.
    pub scale: f32,
    /// Top edge of the plot area in pixels.
    pub plot_top: f32,
}

impl PieFrame {
    pub fn new(style: &ChartStyle) -> Self {
        let (w, h) = style.figure_px();
        let (w, h) = (w as f32, h as f32);
        let (left, bottom, right, top) = PLOT_AREA;
        let plot_w = (right - left) * w;
        let plot_h = (top - bottom) * h;
        PieFrame {
            center: (left * w + plot_w / 2.0, (1.0 - top) * h + plot_h / 2.0),
            scale: plot_w.min(plot_h) / DATA_SPAN,
            plot_top: (1.0 - top) * h,
        }
    }

    pub fn to_px(&self, (x, y): (f32, f32)) -> (f32, f32) {
        (self.center.0 + x * self.scale, self.center.1 - y * self.scale)
    }
}

// ---------------------------------------------------------------------------
// Fonts
// ---------------------------------------------------------------------------

/// The first proportional font of egui's bundled font set.
pub fn chart_font() -> Result<FontArc, ChartError> {
    let defs = egui::FontDefinitions::default();
    let name = defs
        .families
        .get(&egui::FontFamily::Proportional)
        .and_then(|names| names.first())
        .ok_or(ChartError::FontUnavailable)?;
    let data = defs
        .font_data
        .get(name)
        .ok_or(ChartError::FontUnavailable)?;
    Ok(FontArc::try_from_vec(data.font.to_vec())?)
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Center,
    Baseline,
    Bottom,
}

/// Anti-aliased drawing on an RGBA image with source-over blending.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        let [r, g, b, a] = background.to_srgba_unmultiplied();
        Canvas {
            image: RgbaImage::from_pixel(width, height, Rgba([r, g, b, a])),
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn blend(&mut self, x: i32, y: i32, color: Color32, alpha: f32) {
        if x < 0 || y < 0 || x >= self.image.width() as i32 || y >= self.image.height() as i32 {
            return;
        }
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        let src_a = (a as f32 / 255.0) * alpha.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        for (channel, src) in dst.0.iter_mut().take(3).zip([r, g, b]) {
            let mixed = (src as f32 * src_a + *channel as f32 * dst_a * (1.0 - src_a)) / out_a;
            *channel = mixed.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_a * 255.0).round() as u8;
    }

    /// Fill a circular sector. `center` and `radius` are in pixels, angles in
    /// degrees counter-clockwise from 3 o'clock.
    pub fn fill_wedge(
        &mut self,
        center: (f32, f32),
        radius: f32,
        start_angle: f32,
        sweep: f32,
        color: Color32,
        alpha: f32,
    ) {
        let full = sweep >= 360.0 - f32::EPSILON;
        let (a0, a1) = (start_angle.to_radians(), (start_angle + sweep).to_radians());
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();
        let reflex = sweep > 180.0;

        let x_min = (center.0 - radius - 1.0).floor().max(0.0) as i32;
        let x_max = (center.0 + radius + 1.0).ceil().min(self.image.width() as f32) as i32;
        let y_min = (center.1 - radius - 1.0).floor().max(0.0) as i32;
        let y_max = (center.1 + radius + 1.0).ceil().min(self.image.height() as f32) as i32;

        for y in y_min..y_max {
            for x in x_min..x_max {
                let px = x as f32 + 0.5 - center.0;
                let py = center.1 - (y as f32 + 0.5);
                let disc = radius - (px * px + py * py).sqrt();
                let distance = if full {
                    disc
                } else {
                    // signed distances to the two bounding rays' lines
                    let after_start = c0 * py - s0 * px;
                    let before_end = s1 * px - c1 * py;
                    let sector = if reflex {
                        after_start.max(before_end)
                    } else {
                        after_start.min(before_end)
                    };
                    disc.min(sector)
                };
                let coverage = (distance + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, alpha * coverage);
                }
            }
        }
    }

    pub fn fill_rect(&mut self, min: (f32, f32), max: (f32, f32), color: Color32, alpha: f32) {
        let (x0, y0) = (min.0.round() as i32, min.1.round() as i32);
        let (x1, y1) = (max.0.round() as i32, max.1.round() as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color, alpha);
            }
        }
    }

    pub fn stroke_rect(
        &mut self,
        min: (f32, f32),
        max: (f32, f32),
        width: f32,
        color: Color32,
        alpha: f32,
    ) {
        let w = width.max(1.0);
        self.fill_rect(min, (max.0, min.1 + w), color, alpha);
        self.fill_rect((min.0, max.1 - w), max, color, alpha);
        self.fill_rect((min.0, min.1 + w), (min.0 + w, max.1 - w), color, alpha);
        self.fill_rect((max.0 - w, min.1 + w), (max.0, max.1 - w), color, alpha);
    }

    /// Draw a single line of text anchored at `at` (pixels).
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        font: &FontArc,
        size: f32,
        text: &str,
        at: (f32, f32),
        align: (HAlign, VAlign),
        color: Color32,
        bold: bool,
    ) {
        let metrics = TextMetrics::measure(font, size, text);
        let x0 = match align.0 {
            HAlign::Left => at.0,
            HAlign::Center => at.0 - metrics.width / 2.0,
            HAlign::Right => at.0 - metrics.width,
        };
        let baseline = match align.1 {
            VAlign::Center => at.1 + (metrics.ascent + metrics.descent) / 2.0,
            VAlign::Baseline => at.1,
            VAlign::Bottom => at.1 + metrics.descent,
        };

        // faux bold: overdraw with a small horizontal smear
        let passes: &[f32] = if bold { &[0.0, 0.5, 1.0] } else { &[0.0] };
        let smear = (size * 0.03).max(1.0);
        for &pass in passes {
            self.draw_glyphs(font, size, text, (x0 + pass * smear, baseline), color);
        }
    }

    fn draw_glyphs(&mut self, font: &FontArc, size: f32, text: &str, origin: (f32, f32), color: Color32) {
        let scale = PxScale::from(size);
        let scaled = font.as_scaled(scale);
        let mut caret = origin.0;
        let mut previous = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, origin.1));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let (bx, by) = (bounds.min.x as i32, bounds.min.y as i32);
                outlined.draw(|gx, gy, coverage| {
                    self.blend(bx + gx as i32, by + gy as i32, color, coverage);
                });
            }
        }
    }
}

struct TextMetrics {
    width: f32,
    ascent: f32,
    /// Negative: distance below the baseline.
    descent: f32,
}

impl TextMetrics {
    fn measure(font: &FontArc, size: f32, text: &str) -> Self {
        let scaled = font.as_scaled(PxScale::from(size));
        let mut width = 0.0;
        let mut previous = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        TextMetrics {
            width,
            ascent: scaled.ascent(),
            descent: scaled.descent(),
        }
    }
}

// ---------------------------------------------------------------------------
// Chart rasterization
// ---------------------------------------------------------------------------

/// Draw `chart` on a full, untrimmed figure.
pub fn rasterize(chart: &PieChart, style: &ChartStyle, font: &FontArc) -> RgbaImage {
    let (w, h) = style.figure_px();
    let frame = PieFrame::new(style);
    let mut canvas = Canvas::new(w, h, style.background);

    if style.shadow {
        let (sx, sy) = style.shadow_offset;
        for slice in &chart.slices {
            let (ox, oy) = slice.origin();
            let [r, g, b, _] = slice.color.to_srgba_unmultiplied();
            let shade = |c: u8| (c as f32 * 0.3).round() as u8;
            canvas.fill_wedge(
                frame.to_px((ox + sx, oy + sy)),
                frame.scale,
                slice.start_angle,
                slice.sweep,
                Color32::from_rgb(shade(r), shade(g), shade(b)),
                style.shadow_alpha,
            );
        }
    }

    for slice in &chart.slices {
        canvas.fill_wedge(
            frame.to_px(slice.origin()),
            frame.scale,
            slice.start_angle,
            slice.sweep,
            slice.color,
            1.0,
        );
    }

    for slice in &chart.slices {
        draw_slice_texts(&mut canvas, &frame, slice, style, font);
    }

    canvas.draw_text(
        font,
        style.px(style.title_size),
        &chart.title,
        (frame.center.0, frame.plot_top - style.px(style.title_pad)),
        (HAlign::Center, VAlign::Bottom),
        style.title_color,
        true,
    );

    draw_caption(&mut canvas, &frame, &chart.caption, style, font);

    canvas.into_image()
}

fn draw_slice_texts(
    canvas: &mut Canvas,
    frame: &PieFrame,
    slice: &Slice,
    style: &ChartStyle,
    font: &FontArc,
) {
    let label_at = slice.point_at(style.label_distance);
    let halign = if label_at.0 > 0.0 {
        HAlign::Left
    } else {
        HAlign::Right
    };
    canvas.draw_text(
        font,
        style.px(style.label_size),
        &slice.label,
        frame.to_px(label_at),
        (halign, VAlign::Center),
        style.label_color,
        false,
    );

    canvas.draw_text(
        font,
        style.px(style.percent_size),
        &slice.percent_label(),
        frame.to_px(slice.point_at(style.percent_distance)),
        (HAlign::Center, VAlign::Center),
        style.percent_color,
        true,
    );
}

fn draw_caption(
    canvas: &mut Canvas,
    frame: &PieFrame,
    caption: &str,
    style: &ChartStyle,
    font: &FontArc,
) {
    let size = style.px(style.caption_size);
    let at = frame.to_px((0.0, style.caption_y));
    let metrics = TextMetrics::measure(font, size, caption);
    let pad = 0.3 * size;
    let min = (
        at.0 - metrics.width / 2.0 - pad,
        at.1 - metrics.ascent - pad,
    );
    let max = (
        at.0 + metrics.width / 2.0 + pad,
        at.1 - metrics.descent + pad,
    );
    canvas.fill_rect(min, max, style.caption_box, style.caption_box_alpha);
    canvas.stroke_rect(min, max, style.px(1.0), Color32::BLACK, style.caption_box_alpha);
    canvas.draw_text(
        font,
        size,
        caption,
        at,
        (HAlign::Center, VAlign::Baseline),
        style.caption_color,
        false,
    );
}

// ---------------------------------------------------------------------------
// Trimming and PNG output
// ---------------------------------------------------------------------------

/// Crop to the pixels that differ from `background`, keeping `pad` pixels
/// around them. An image with nothing drawn is returned unchanged.
pub fn trim(image: &RgbaImage, background: Color32, pad: u32) -> RgbaImage {
    let [r, g, b, a] = background.to_srgba_unmultiplied();
    let bg = Rgba([r, g, b, a]);

    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if *pixel == bg {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }

    let Some((x0, y0, x1, y1)) = bounds else {
        return image.clone();
    };
    let x0 = x0.saturating_sub(pad);
    let y0 = y0.saturating_sub(pad);
    let x1 = (x1 + pad).min(image.width() - 1);
    let y1 = (y1 + pad).min(image.height() - 1);
    image::imageops::crop_imm(image, x0, y0, x1 - x0 + 1, y1 - y0 + 1).to_image()
}

/// Render the chart as it is saved to disk: drawn, then trimmed.
pub fn render(chart: &PieChart, style: &ChartStyle) -> Result<RgbaImage, ChartError> {
    let font = chart_font()?;
    let full = rasterize(chart, style, &font);
    let pad = (style.trim_pad * style.dpi as f32).round() as u32;
    Ok(trim(&full, style.background, pad))
}

/// Write `image` as an RGBA PNG carrying its physical resolution.
pub fn write_png(image: &RgbaImage, path: &Path, dpi: u32) -> Result<(), ChartError> {
    let file = File::create(path).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let encode_error = |source| ChartError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let per_meter = (dpi as f64 / 0.0254).round() as u32;
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: per_meter,
        yppu: per_meter,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder.write_header().map_err(encode_error)?;
    writer.write_image_data(image.as_raw()).map_err(encode_error)?;
    writer.finish().map_err(encode_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::layout::StatusCounts;
    use crate::data::model::{CellValue, SalesTable};
    use tempfile::tempdir;

    const STATUS: &str = "Status Pagamento";

    fn chart(statuses: &[&str], style: &ChartStyle) -> PieChart {
        let sales = SalesTable::new(
            vec![STATUS.into()],
            statuses.iter().map(|s| vec![CellValue::from(*s)]).collect(),
        );
        let counts = StatusCounts::from_table(&sales, STATUS);
        PieChart::build(&counts, sales.len(), style).unwrap()
    }

    fn small_style() -> ChartStyle {
        ChartStyle {
            dpi: 60,
            ..ChartStyle::default()
        }
    }

    fn pixel(image: &RgbaImage, (x, y): (f32, f32)) -> Color32 {
        let p = image.get_pixel(x as u32, y as u32);
        Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3])
    }

    #[test]
    fn slices_are_filled_with_their_colors() {
        let style = small_style();
        let mut statuses = vec!["Pago"; 7];
        statuses.extend(["Pendente"; 3]);
        let chart = chart(&statuses, &style);
        let image = rasterize(&chart, &style, &chart_font().unwrap());
        let frame = PieFrame::new(&style);

        for slice in &chart.slices {
            let inside = frame.to_px(slice.point_at(0.5));
            assert_eq!(pixel(&image, inside), slice.color, "{}", slice.label);
        }
    }

    #[test]
    fn pending_slice_is_offset_from_center() {
        let style = small_style();
        let chart = chart(&["Pago", "Pendente"], &style);
        let image = rasterize(&chart, &style, &chart_font().unwrap());
        let frame = PieFrame::new(&style);

        // Pago spans 90°..270°, Pendente 270°..450° pushed right by 0.1 r:
        // just right of the centre lies in the gap between them.
        let gap = frame.to_px((0.05, 0.5));
        assert_eq!(pixel(&image, gap), style.background);
        let pending = frame.to_px((0.3, 0.5));
        assert_eq!(pixel(&image, pending), chart.slices[1].color);
    }

    #[test]
    fn full_circle_covers_every_direction() {
        let style = small_style();
        let chart = chart(&["Pago"; 3], &style);
        let image = rasterize(&chart, &style, &chart_font().unwrap());
        let frame = PieFrame::new(&style);

        for degrees in [0.0f32, 45.0, 135.0, 200.0, 315.0] {
            let t = degrees.to_radians();
            let p = frame.to_px((0.4 * t.cos(), 0.4 * t.sin()));
            assert_eq!(pixel(&image, p), chart.slices[0].color, "{degrees}°");
        }
    }

    #[test]
    fn trim_keeps_padding_around_content() {
        let mut canvas = Canvas::new(100, 80, Color32::WHITE);
        canvas.fill_rect((40.0, 30.0), (50.0, 35.0), Color32::BLACK, 1.0);
        let trimmed = trim(&canvas.into_image(), Color32::WHITE, 5);
        assert_eq!(trimmed.dimensions(), (20, 15));
    }

    #[test]
    fn blank_image_is_not_trimmed() {
        let image = Canvas::new(30, 20, Color32::WHITE).into_image();
        assert_eq!(trim(&image, Color32::WHITE, 3).dimensions(), (30, 20));
    }

    #[test]
    fn png_records_resolution() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grafico.png");
        let image = Canvas::new(8, 6, Color32::WHITE).into_image();

        write_png(&image, &path, 300).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (8, 6));
        let dims = info.pixel_dims.unwrap();
        assert_eq!(dims.xppu, 11811);
        assert_eq!(dims.unit, png::Unit::Meter);
    }
}

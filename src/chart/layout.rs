use std::collections::BTreeMap;

use eframe::egui::Color32;

use super::style::ChartStyle;
use crate::color::ColorMap;
use crate::data::model::{CellValue, SalesTable};

// ---------------------------------------------------------------------------
// StatusCounts
// ---------------------------------------------------------------------------

/// Occurrences of each status, most frequent first. Ties keep the order in
/// which the statuses first appear in the table. Blank cells are not counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCounts {
    entries: Vec<(String, usize)>,
}

impl StatusCounts {
    pub fn from_table(table: &SalesTable, status_column: &str) -> Self {
        let Some(col) = table.column_index(status_column) else {
            return StatusCounts {
                entries: Vec::new(),
            };
        };

        let mut slots: BTreeMap<&CellValue, usize> = BTreeMap::new();
        let mut entries: Vec<(String, usize)> = Vec::new();
        for cell in table.rows().iter().filter_map(|row| row.get(col)) {
            if cell.is_empty() {
                continue;
            }
            let slot = *slots.entry(cell).or_insert_with(|| {
                entries.push((cell.to_string(), 0));
                entries.len() - 1
            });
            entries[slot].1 += 1;
        }

        // stable: ties stay in first-appearance order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        StatusCounts { entries }
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PieChart – resolved slices, ready for any sink
// ---------------------------------------------------------------------------

/// One pie slice. Angles are degrees, counter-clockwise from 3 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub count: usize,
    pub fraction: f32,
    pub start_angle: f32,
    pub sweep: f32,
    pub color: Color32,
    /// Outward shift as a fraction of the radius.
    pub explode: f32,
}

impl Slice {
    pub fn mid_angle(&self) -> f32 {
        self.start_angle + self.sweep / 2.0
    }

    /// Centre of the (possibly exploded) slice, in radius units.
    pub fn origin(&self) -> (f32, f32) {
        let theta = self.mid_angle().to_radians();
        (self.explode * theta.cos(), self.explode * theta.sin())
    }

    /// Point at `distance` radii from the slice origin along its bisector.
    pub fn point_at(&self, distance: f32) -> (f32, f32) {
        let (ox, oy) = self.origin();
        let theta = self.mid_angle().to_radians();
        (ox + distance * theta.cos(), oy + distance * theta.sin())
    }

    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }

    pub fn is_full_circle(&self) -> bool {
        self.sweep >= 360.0 - f32::EPSILON
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub caption: String,
    /// Rows in the full table, shown in the caption.
    pub total_rows: usize,
    pub slices: Vec<Slice>,
}

impl PieChart {
    /// Lay out one slice per status. `None` when there is nothing to draw.
    pub fn build(counts: &StatusCounts, total_rows: usize, style: &ChartStyle) -> Option<Self> {
        if counts.is_empty() {
            return None;
        }
        let total = counts.total();

        let labels: Vec<String> = counts.entries().iter().map(|(l, _)| l.clone()).collect();
        let colors = ColorMap::new(&labels, style);

        let mut cumulative = 0usize;
        let slices = counts
            .entries()
            .iter()
            .map(|(label, count)| {
                let start = cumulative as f32 / total as f32;
                cumulative += count;
                let fraction = *count as f32 / total as f32;
                Slice {
                    label: label.clone(),
                    count: *count,
                    fraction,
                    start_angle: style.start_angle + start * 360.0,
                    sweep: fraction * 360.0,
                    color: colors.color_for(label),
                    explode: if *label == style.exploded_status {
                        style.explode_fraction
                    } else {
                        0.0
                    },
                }
            })
            .collect();

        Some(PieChart {
            title: style.title.clone(),
            caption: style.caption(total_rows),
            total_rows,
            slices,
        })
    }
}

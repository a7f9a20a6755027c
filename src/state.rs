use std::path::{Path, PathBuf};

use crate::chart::layout::PieChart;
use crate::chart::sink::{ChartSink, PngSink};
use crate::chart::style::ChartStyle;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The viewer's state, independent of rendering.
pub struct ViewerState {
    /// The chart on display.
    pub chart: PieChart,

    /// Theme used when saving a copy.
    pub style: ChartStyle,

    /// Where the pipeline saved the image, if it did.
    pub saved_path: Option<PathBuf>,

    /// Whether percentage labels are drawn on the slices.
    pub show_percentages: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl ViewerState {
    pub fn new(chart: PieChart, style: ChartStyle, saved_path: Option<PathBuf>) -> Self {
        Self {
            chart,
            style,
            saved_path,
            show_percentages: true,
            status_message: None,
        }
    }

    /// Save another copy of the chart image at `path`.
    pub fn save_copy(&mut self, path: &Path) {
        match PngSink::new(path).present(&self.chart, &self.style) {
            Ok(()) => {
                self.status_message = Some(format!("Imagem salva em '{}'.", path.display()));
            }
            Err(e) => {
                log::error!("Falha ao salvar a imagem: {e}");
                self.status_message = Some(format!("Erro: {e}"));
            }
        }
    }
}

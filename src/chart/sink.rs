use std::path::PathBuf;

use super::layout::PieChart;
use super::raster;
use super::style::ChartStyle;
use crate::error::ChartError;

/// Somewhere a finished chart can go: a file, a window, or nowhere.
pub trait ChartSink {
    fn present(&mut self, chart: &PieChart, style: &ChartStyle) -> Result<(), ChartError>;
}

// ---------------------------------------------------------------------------
// PNG file
// ---------------------------------------------------------------------------

/// Saves the trimmed raster at the style's DPI.
pub struct PngSink {
    path: PathBuf,
}

impl PngSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ChartSink for PngSink {
    fn present(&mut self, chart: &PieChart, style: &ChartStyle) -> Result<(), ChartError> {
        let image = raster::render(chart, style)?;
        raster::write_png(&image, &self.path, style.dpi)?;
        log::info!(
            "Gráfico de distribuição de pagamentos profissional gerado em '{}'.",
            self.path.display()
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Headless
// ---------------------------------------------------------------------------

/// Accepts charts without showing them, recording each one.
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Default)]
pub struct HeadlessSink {
    pub presented: Vec<PieChart>,
}

impl ChartSink for HeadlessSink {
    fn present(&mut self, chart: &PieChart, _style: &ChartStyle) -> Result<(), ChartError> {
        log::debug!("headless sink: {} slices", chart.slices.len());
        self.presented.push(chart.clone());
        Ok(())
    }
}

use std::path::PathBuf;

use eframe::egui;

use crate::chart::layout::PieChart;
use crate::chart::sink::ChartSink;
use crate::chart::style::ChartStyle;
use crate::error::ChartError;
use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ChartViewerApp {
    pub state: ViewerState,
}

impl ChartViewerApp {
    pub fn new(state: ViewerState) -> Self {
        Self { state }
    }
}

impl eframe::App for ChartViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: status table ----
        egui::SidePanel::left("status_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: title, pie, caption ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new(&self.state.chart.title).strong());
            });
            egui::TopBottomPanel::bottom("caption")
                .show_separator_line(false)
                .show_inside(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(&self.state.chart.caption);
                    });
                });
            plot::status_pie(ui, &self.state);
        });
    }
}

// ---------------------------------------------------------------------------
// Window sink
// ---------------------------------------------------------------------------

/// Opens the chart in a native window and blocks until it is closed.
pub struct WindowSink {
    saved_path: Option<PathBuf>,
}

impl WindowSink {
    /// `saved_path` is shown in the side panel and seeds "save as".
    pub fn new(saved_path: Option<PathBuf>) -> Self {
        Self { saved_path }
    }
}

impl ChartSink for WindowSink {
    fn present(&mut self, chart: &PieChart, style: &ChartStyle) -> Result<(), ChartError> {
        let state = ViewerState::new(chart.clone(), style.clone(), self.saved_path.clone());

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1000.0, 800.0])
                .with_min_inner_size([600.0, 400.0]),
            ..Default::default()
        };

        let outcome = eframe::run_native(
            "Status de Pagamento",
            options,
            Box::new(|_cc| Ok(Box::new(ChartViewerApp::new(state)))),
        );
        viewer_closed(outcome);
        Ok(())
    }
}

/// A viewer that cannot start (no display, no GL) is logged, never returned.
fn viewer_closed(outcome: eframe::Result<()>) {
    if let Err(e) = outcome {
        log::warn!("Não foi possível abrir a janela do gráfico: {e}");
    }
}

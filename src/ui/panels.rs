use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Arquivo", |ui: &mut Ui| {
            if ui.button("Salvar imagem como…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .selectable_label(state.show_percentages, "Percentuais")
            .clicked()
        {
            state.show_percentages = !state.show_percentages;
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Erro") {
                Color32::RED
            } else {
                Color32::DARK_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Side panel – status table
// ---------------------------------------------------------------------------

/// Render the per-status counts next to the chart.
pub fn side_panel(ui: &mut Ui, state: &ViewerState) {
    ui.heading("Status");
    ui.separator();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(90.0))
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Status");
            });
            header.col(|ui| {
                ui.strong("Clientes");
            });
            header.col(|ui| {
                ui.strong("%");
            });
        })
        .body(|mut body| {
            for slice in &state.chart.slices {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(RichText::new(&slice.label).color(slice.color).strong());
                    });
                    row.col(|ui| {
                        ui.label(slice.count.to_string());
                    });
                    row.col(|ui| {
                        ui.label(slice.percent_label());
                    });
                });
            }
        });

    ui.separator();
    ui.label(&state.chart.caption);
    if let Some(path) = &state.saved_path {
        ui.label(RichText::new(format!("Imagem: {}", path.display())).weak());
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut ViewerState) {
    let default_name = state
        .saved_path
        .as_ref()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("grafico.png")
        .to_string();

    let file = rfd::FileDialog::new()
        .set_title("Salvar gráfico")
        .add_filter("PNG", &["png"])
        .set_file_name(&default_name)
        .save_file();

    if let Some(path) = file {
        log::info!("Salvando cópia do gráfico em '{}'", path.display());
        state.save_copy(&path);
    }
}

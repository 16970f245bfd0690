use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, metrics, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AirQualityApp {
    pub state: AppState,
}

impl AirQualityApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for AirQualityApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: data credit ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.weak("Data: Beijing Air Quality (2013–2017)");
        });

        // ---- Central panel: metrics and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(agg) = &self.state.aggregates else {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a dataset to begin  (File → Open…)");
                });
                return;
            };
            let policy = &self.state.policy;

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    metrics::headline_row(ui, &agg.summary);
                    ui.add_space(8.0);
                    metrics::extremes_row(ui, agg, policy);
                    ui.separator();
                    charts::dashboard(ui, agg, policy);
                });
        });
    }
}

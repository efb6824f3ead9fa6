use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: site and payload selection ----
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: both charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(
                    egui::RichText::new("SpaceX Launch Records Dashboard")
                        .size(32.0)
                        .color(egui::Color32::from_rgb(0x50, 0x3D, 0x36)),
                );
            });
            ui.separator();

            let Some(charts) = &self.state.charts else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a launch records file  (File → Open…)");
                });
                return;
            };

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    let chart_height = (ui.available_height() * 0.42).max(240.0);
                    plot::pie_chart(ui, &charts.pie, chart_height);
                    ui.add_space(12.0);
                    plot::scatter_chart(ui, &charts.scatter, &self.state.color_map, chart_height);
                });
        });
    }
}

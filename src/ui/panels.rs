use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::filter::{PayloadRange, SiteFilter};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the site selector and payload range controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selection");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state below.
    let sites = dataset.sites.clone();
    let bounds = dataset.payload_bounds();

    // ---- Launch site (searchable) ----
    ui.strong("Launch Site");
    ui.add(
        egui::TextEdit::singleline(&mut state.site_search)
            .hint_text("Select a Launch Site here"),
    );
    let needle = state.site_search.to_lowercase();
    let current = state.selection.site.clone();
    let mut picked = None;

    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == SiteFilter::All, SiteFilter::ALL_LABEL)
                .clicked()
            {
                picked = Some(SiteFilter::All);
            }
            for site in sites
                .iter()
                .filter(|s| needle.is_empty() || s.to_lowercase().contains(&needle))
            {
                let is_current = matches!(&current, SiteFilter::Site(s) if s == site);
                if ui.selectable_label(is_current, site).clicked() {
                    picked = Some(SiteFilter::Site(site.clone()));
                }
            }
        });
    if let Some(site) = picked {
        state.set_site(site);
    }
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let cfg = &state.config;
    let (data_lo, data_hi) = bounds.unwrap_or((cfg.slider_min, cfg.slider_max));
    let slider_range = cfg.slider_min.min(data_lo)..=cfg.slider_max.max(data_hi);
    let step = cfg.slider_step;

    let PayloadRange { mut low, mut high } = state.selection.payload;
    let low_changed = ui
        .add(Slider::new(&mut low, slider_range.clone()).step_by(step).text("min"))
        .changed();
    let high_changed = ui
        .add(Slider::new(&mut high, slider_range).step_by(step).text("max"))
        .changed();
    if low_changed || high_changed {
        state.set_payload_range(PayloadRange::new(low, high));
    }
    if low > high {
        ui.label(RichText::new("Empty range: min is above max.").color(Color32::YELLOW));
    }
    ui.separator();

    if ui.button("Reset").clicked() {
        state.reset_selection();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some((total, visible)) = state.counts() {
            ui.label(format!("{total} launches loaded, {visible} in payload range"));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} sites ({})",
                    dataset.len(),
                    dataset.sites.len(),
                    path.display()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

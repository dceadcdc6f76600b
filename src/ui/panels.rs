use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::charts::SiteSelection;
use crate::data::model::PayloadRange;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – site dropdown and payload sliders
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Launch Records");
    ui.separator();

    // ---- Site dropdown ----
    ui.strong("Launch Site");

    // Clone what we need so we can mutate state inside the combo.
    let sites = state.dataset.sites.clone();
    let current = state.selection.site.clone();

    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == SiteSelection::AllSites, "All Sites")
                .clicked()
            {
                state.set_site(SiteSelection::AllSites);
            }
            for site in &sites {
                let option = SiteSelection::Site(site.clone());
                if ui.selectable_label(current == option, site).clicked() {
                    state.set_site(option);
                }
            }
        });

    ui.separator();

    // ---- Payload range sliders ----
    ui.strong("Payload range (kg)");

    let bounds = state.slider_bounds;
    let mut min_kg = state.selection.payload.min_kg;
    let mut max_kg = state.selection.payload.max_kg;

    let mut changed = false;
    changed |= ui
        .add(Slider::new(&mut min_kg, bounds.min_kg..=bounds.max_kg).text("min"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut max_kg, bounds.min_kg..=bounds.max_kg).text("max"))
        .changed();
    if changed {
        state.set_payload_range(PayloadRange::new(min_kg, max_kg));
    }

    ui.separator();

    // ---- Booster category legend ----
    ui.strong("Booster category");
    for (category, color) in state.color_map.legend_entries() {
        ui.label(RichText::new(category).color(color));
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

        ui.label(format!(
            "{} launches loaded, {} shown",
            state.dataset.len(),
            state.scatter.points.len()
        ));

        ui.separator();

        if let Some(msg) = &state.status_message {
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
                    "Loaded {} launch records from {} ({} sites)",
                    dataset.len(),
                    path.display(),
                    dataset.sites.len()
                );
                state.replace_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

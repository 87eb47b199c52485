use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, LoadStatus};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title, the country selector and the load status.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading(format!("{} Data", state.config.columns.metric));

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("Select {}:", state.config.columns.category));
        country_selector(ui, state);

        ui.separator();

        match &state.status {
            LoadStatus::Loading => {
                ui.spinner();
                ui.label("Loading...");
            }
            LoadStatus::Loaded => {
                if let Some(ds) = &state.dataset {
                    ui.label(format!(
                        "{} records, {} {}",
                        ds.len(),
                        ds.categories.len(),
                        if ds.categories.len() == 1 { "category" } else { "categories" }
                    ));
                }
            }
            LoadStatus::Failed(msg) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
        }
    });
    ui.add_space(4.0);
}

/// Combo box over the dataset's categories; disabled when there are none.
fn country_selector(ui: &mut Ui, state: &mut AppState) {
    let enabled = state.selector_enabled();
    let current = state.selection.clone().unwrap_or_default();
    let mut picked: Option<String> = None;

    ui.add_enabled_ui(enabled, |ui: &mut Ui| {
        egui::ComboBox::from_id_salt("category_select")
            .selected_text(&current)
            .width(220.0)
            .show_ui(ui, |ui: &mut Ui| {
                for category in state.categories() {
                    if ui
                        .selectable_label(current == *category, category)
                        .clicked()
                    {
                        picked = Some(category.clone());
                    }
                }
            });
    });

    if let Some(category) = picked {
        state.select(&category);
    }
}

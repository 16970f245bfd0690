use std::collections::BTreeSet;
use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::model::{DayType, Season};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let logo = egui::include_image!("../../assets/logo.png");
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add(
            egui::Image::new(logo)
                .max_width(ui.available_width() * 0.6)
                .max_height(120.0)
                .rounding(4.0),
        );
    });
    ui.add_space(4.0);

    ui.heading("Filter Data");
    ui.separator();

    let (Some(dataset), Some(current)) = (state.dataset.clone(), &state.criteria) else {
        ui.label("No dataset loaded.");
        return;
    };

    // Edit a copy; the state only recomputes if something differs.
    let mut criteria = current.clone();
    let years: Vec<i32> = dataset.years.iter().copied().collect();
    let stations: Vec<String> = dataset.stations.iter().cloned().collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Date range ----
            ui.strong("Date range");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("From");
                ui.add(DatePickerButton::new(&mut criteria.date_from).id_salt("date_from"));
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("To");
                ui.add(DatePickerButton::new(&mut criteria.date_to).id_salt("date_to"));
            });
            if let Some((lo, hi)) = dataset.date_bounds {
                criteria.date_from = criteria.date_from.clamp(lo, hi);
                criteria.date_to = criteria.date_to.clamp(lo, hi);
            }
            ui.separator();

            // ---- Categorical selections ----
            checklist(ui, "Year", &years, &mut criteria.years, |y| y.to_string());
            checklist(ui, "Station", &stations, &mut criteria.stations, |s| s.clone());

            // ---- Hour of day ----
            ui.separator();
            ui.strong("Hour range (24 h)");
            ui.add(egui::Slider::new(&mut criteria.hour_from, 0..=23).text("from"));
            ui.add(egui::Slider::new(&mut criteria.hour_to, 0..=23).text("to"));
            if criteria.hour_to < criteria.hour_from {
                criteria.hour_to = criteria.hour_from;
            }

            // ---- PM2.5 range ----
            if let Some((lo, hi)) = dataset.pm25_bounds {
                ui.separator();
                ui.strong("PM2.5 range (µg/m³)");
                ui.add(egui::Slider::new(&mut criteria.pm25_min, lo..=hi).text("min"));
                ui.add(egui::Slider::new(&mut criteria.pm25_max, lo..=hi).text("max"));
                if criteria.pm25_max < criteria.pm25_min {
                    criteria.pm25_max = criteria.pm25_min;
                }
            }
            ui.separator();

            checklist(ui, "Day type", &DayType::ALL, &mut criteria.day_types, |d| {
                d.label().to_string()
            });
            checklist(ui, "Season", &Season::ALL, &mut criteria.seasons, |s| {
                s.label().to_string()
            });
        });

    state.update_criteria(criteria);
}

/// Collapsible multi-select with All / None shortcuts.
fn checklist<T, F>(
    ui: &mut Ui,
    title: &str,
    options: &[T],
    selected: &mut BTreeSet<T>,
    label: F,
) where
    T: Ord + Clone,
    F: Fn(&T) -> String,
{
    let header_text = format!("{title}  ({}/{})", selected.len(), options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(options.len() <= 6)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    selected.extend(options.iter().cloned());
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                }
            });

            for val in options {
                let mut checked = selected.contains(val);
                if ui.checkbox(&mut checked, label(val)).changed() {
                    if checked {
                        selected.insert(val.clone());
                    } else {
                        selected.remove(val);
                    }
                }
            }
        });
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
        ui.menu_button("Filters", |ui: &mut Ui| {
            let loaded = state.dataset.is_some();
            if ui.add_enabled(loaded, egui::Button::new("Reset all")).clicked() {
                state.reset_criteria();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("Air Quality Dashboard");

        if let Some(ds) = &state.dataset {
            ui.separator();
            ui.label(format!(
                "{} of {} hourly records selected",
                state.visible_indices.len(),
                ds.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open air-quality data")
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_into(state, &path);
    }
}

/// Load `path` and install it, or surface the error in the status line.
pub fn load_into(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => state.set_dataset(dataset),
        Err(e) => {
            log::error!("Failed to load {}: {e}", path.display());
            state.set_load_error(format!("Error: {e}"));
        }
    }
}

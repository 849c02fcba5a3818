//! egui rendering of the settings dialog

use crate::config::ExecutionMode;
use crate::dialog::{DialogOutcome, GeneralPanel, PathPanel, PathPicker, SettingsDialog, Tab, RESTART_NOTE};
use crate::store::SettingsStore;
use egui::RichText;

const TABS: [Tab; 2] = [Tab::General, Tab::Paths];

/// Draw the dialog for one frame
///
/// Returns the outcome once the user has confirmed or cancelled.
pub fn show_settings_window(
    ctx: &egui::Context,
    dialog: &mut SettingsDialog,
    store: &mut SettingsStore,
    picker: &mut dyn PathPicker,
) -> Option<DialogOutcome> {
    dialog.sync(store);
    if !dialog.is_open() {
        return dialog.outcome();
    }

    let mut open = true;
    egui::Window::new("Settings")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(400.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for tab in TABS {
                    let selected = dialog.current_tab() == tab;
                    if ui.selectable_label(selected, dialog.tab_title(tab)).clicked() {
                        dialog.select_tab(tab);
                    }
                }
            });
            ui.separator();

            match dialog.current_tab() {
                Tab::General => general_tab(ui, dialog.general_mut(), store),
                Tab::Paths => paths_tab(ui, dialog.paths_mut(), store, picker),
            }

            ui.add_space(8.0);
            ui.separator();

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        dialog.reject(store);
                    }
                    if ui.button("OK").clicked() {
                        if let Err(e) = dialog.accept(store) {
                            log::error!("Failed to save settings: {}", e);
                        }
                    }
                });
            });
        });

    // Title bar close behaves like the Close button
    if !open {
        dialog.reject(store);
    }

    dialog.outcome()
}

fn general_tab(ui: &mut egui::Ui, panel: &mut GeneralPanel, store: &mut SettingsStore) {
    ui.group(|ui| {
        ui.label(RichText::new("VU1").strong());
        for mode in ExecutionMode::ALL {
            if ui.radio(panel.is_selected(mode), mode.label()).clicked() {
                panel.select(store, mode);
            }
        }
        ui.label(RESTART_NOTE);
    });
}

fn paths_tab(
    ui: &mut egui::Ui,
    panel: &mut PathPanel,
    store: &mut SettingsStore,
    picker: &mut dyn PathPicker,
) {
    ui.group(|ui| {
        ui.label(RichText::new("Rom Directories").strong());

        egui::ScrollArea::vertical()
            .id_salt("rom_directories_scroll")
            .max_height(160.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                let mut clicked = None;
                for (row, dir) in panel.directories().iter().enumerate() {
                    let selected = panel.selected_row() == Some(row);
                    if ui.selectable_label(selected, dir.display().to_string()).clicked() {
                        clicked = Some(row);
                    }
                }
                if clicked.is_some() {
                    panel.select_row(clicked);
                }
            });

        ui.horizontal(|ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let can_remove = panel.selected_row().is_some();
                if ui.add_enabled(can_remove, egui::Button::new("Remove")).clicked() {
                    panel.remove_selected(store);
                }
                if ui.button("Add").clicked() {
                    panel.add_directory(store, picker);
                }
            });
        });
    });

    ui.group(|ui| {
        ui.label(RichText::new("Other").strong());

        egui::Grid::new("other_paths_grid")
            .num_columns(3)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("Bios:");
                ui.label(panel.bios_summary());
                if ui.button("Browse").clicked() {
                    panel.browse_bios(store, picker);
                }
                ui.end_row();

                ui.label("Screenshots:");
                let screenshots = panel
                    .screenshot_directory()
                    .map(|d| d.display().to_string())
                    .unwrap_or_else(|| "Not set".to_string());
                ui.label(screenshots);
                if ui.button("Browse").clicked() {
                    panel.browse_screenshot_directory(store, picker);
                }
                ui.end_row();
            });
    });
}

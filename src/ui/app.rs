//! Host application for the settings dialog
//!
//! This module provides:
//! - Menu bar (File → Settings, Paths, Reload, Quit)
//! - A summary of the current settings
//! - The settings dialog window

use super::picker::NativePicker;
use super::settings_window::show_settings_window;
use crate::bios;
use crate::dialog::{PathPicker, SettingsDialog, Tab};
use crate::store::{SettingsStore, Subscription};

pub struct SettingsApp {
    store: SettingsStore,
    picker: Box<dyn PathPicker>,
    dialog: Option<SettingsDialog>,

    // Summary panel state, kept current through its own subscription
    summary: Subscription,
    bios_summary: String,
}

impl SettingsApp {
    pub fn new(store: SettingsStore) -> Self {
        Self::with_picker(store, Box::new(NativePicker))
    }

    pub fn with_picker(mut store: SettingsStore, picker: Box<dyn PathPicker>) -> Self {
        let summary = store.subscribe();
        let bios_summary = bios::describe(store.bios_path());
        Self {
            store,
            picker,
            dialog: None,
            summary,
            bios_summary,
        }
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn dialog(&self) -> Option<&SettingsDialog> {
        self.dialog.as_ref()
    }

    /// Open the settings dialog at `tab`, or switch tabs if it is already open
    pub fn open_settings(&mut self, tab: Tab) {
        match &mut self.dialog {
            Some(dialog) => dialog.select_tab(tab),
            None => self.dialog = Some(SettingsDialog::open_at(&mut self.store, tab)),
        }
    }

    fn sync_summary(&mut self) {
        if !self.summary.drain().is_empty() {
            self.bios_summary = bios::describe(self.store.bios_path());
        }
    }

    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Settings…").clicked() {
                        self.open_settings(Tab::General);
                        ui.close_menu();
                    }
                    if ui.button("Paths…").clicked() {
                        self.open_settings(Tab::Paths);
                        ui.close_menu();
                    }
                    if ui.button("Reload from disk").clicked() {
                        if let Err(e) = self.store.reload() {
                            log::error!("Failed to reload settings: {}", e);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });
    }

    fn render_summary(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Current settings");
            ui.add_space(8.0);

            egui::Grid::new("summary_grid")
                .num_columns(2)
                .spacing([20.0, 6.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.label("VU1:");
                    ui.label(self.store.execution_mode().label());
                    ui.end_row();

                    ui.label("Rom directories:");
                    ui.vertical(|ui| {
                        if self.store.rom_directories().is_empty() {
                            ui.weak("None");
                        }
                        for dir in self.store.rom_directories() {
                            ui.label(dir.display().to_string());
                        }
                    });
                    ui.end_row();

                    ui.label("Bios:");
                    ui.label(&self.bios_summary);
                    ui.end_row();

                    ui.label("Screenshots:");
                    match self.store.screenshot_directory() {
                        Some(dir) => ui.label(dir.display().to_string()),
                        None => ui.weak("Not set"),
                    };
                    ui.end_row();
                });

            if self.store.is_dirty() {
                ui.add_space(8.0);
                ui.colored_label(egui::Color32::from_rgb(230, 180, 80), "Unsaved changes");
            }
        });
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };

        let outcome = show_settings_window(ctx, dialog, &mut self.store, self.picker.as_mut());
        if let Some(outcome) = outcome {
            log::debug!("Settings dialog closed: {:?}", outcome);
            if let Some(dialog) = self.dialog.take() {
                dialog.close(&mut self.store);
            }
        }
    }

    /// One frame of the whole UI
    pub fn ui(&mut self, ctx: &egui::Context) {
        self.sync_summary();
        self.render_menu_bar(ctx);
        self.render_summary(ctx);
        self.render_dialog(ctx);
    }
}

impl eframe::App for SettingsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::path::{Path, PathBuf};

    struct NoPicker;

    impl PathPicker for NoPicker {
        fn pick_folder(&mut self, _: &str, _: Option<&Path>) -> Option<PathBuf> {
            None
        }

        fn pick_file(&mut self, _: &str, _: Option<&Path>, _: &str, _: &[&str]) -> Option<PathBuf> {
            None
        }
    }

    fn app() -> SettingsApp {
        SettingsApp::with_picker(SettingsStore::in_memory(Config::default()), Box::new(NoPicker))
    }

    #[test]
    fn open_settings_reuses_the_open_dialog() {
        let mut app = app();
        app.open_settings(Tab::General);
        app.open_settings(Tab::Paths);

        assert_eq!(app.dialog().map(SettingsDialog::current_tab), Some(Tab::Paths));
        // App summary plus the two panels
        assert_eq!(app.store().subscriber_count(), 3);
    }

    #[test]
    fn closed_dialog_is_torn_down_on_next_frame() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.open_settings(Tab::Paths);

        let _ = ctx.run(egui::RawInput::default(), |ctx| app.ui(ctx));
        assert!(app.dialog().is_some());

        if let Some(dialog) = app.dialog.as_mut() {
            dialog.reject(&mut app.store);
        }
        let _ = ctx.run(egui::RawInput::default(), |ctx| app.ui(ctx));

        assert!(app.dialog().is_none());
        assert_eq!(app.store().subscriber_count(), 1);
    }

    #[test]
    fn summary_follows_bios_changes() {
        let mut app = app();
        assert_eq!(app.bios_summary, bios::NO_BIOS);

        app.store.set_bios_path(PathBuf::from("/nowhere/scph.bin"));
        app.sync_summary();
        assert_eq!(app.bios_summary, bios::INVALID_BIOS);
    }
}

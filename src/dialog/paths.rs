//! Paths tab: ROM directories, BIOS image and screenshot directory

use super::picker::{confirmed, PathPicker};
use super::Panel;
use crate::bios;
use crate::store::{SettingsEvent, SettingsStore, Subscription};
use std::path::{Path, PathBuf};

pub struct PathPanel {
    directories: Vec<PathBuf>,
    selected: Option<usize>,
    bios_summary: String,
    screenshot_dir: Option<PathBuf>,
    subscription: Subscription,
}

impl PathPanel {
    pub fn new(store: &mut SettingsStore) -> Self {
        Self {
            directories: store.rom_directories().to_vec(),
            selected: None,
            bios_summary: bios::describe(store.bios_path()),
            screenshot_dir: store.screenshot_directory().map(Path::to_path_buf),
            subscription: store.subscribe(),
        }
    }

    /// Visible ROM directory list
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_directory(&self) -> Option<&Path> {
        self.selected
            .and_then(|row| self.directories.get(row))
            .map(PathBuf::as_path)
    }

    /// Out of range rows clear the selection
    pub fn select_row(&mut self, row: Option<usize>) {
        self.selected = row.filter(|&r| r < self.directories.len());
    }

    /// Prompt for a directory and hand it to the store
    ///
    /// The list itself grows when the store announces the addition.
    pub fn add_directory(&mut self, store: &mut SettingsStore, picker: &mut dyn PathPicker) -> bool {
        let start = store.last_used_directory().map(Path::to_path_buf);
        let Some(dir) = confirmed(picker.pick_folder("Open ROM Directory", start.as_deref())) else {
            return false;
        };

        log::debug!("ROM directory picked: {}", dir.display());
        store.set_last_used_directory(dir.clone());
        store.add_rom_directory(dir)
    }

    /// Drop the selected row from the list and the store
    pub fn remove_selected(&mut self, store: &mut SettingsStore) -> Option<PathBuf> {
        let row = self.selected.take()?;
        if row >= self.directories.len() {
            return None;
        }

        let dir = self.directories.remove(row);
        store.remove_rom_directory(&dir);
        Some(dir)
    }

    pub fn bios_summary(&self) -> &str {
        &self.bios_summary
    }

    pub fn browse_bios(&mut self, store: &mut SettingsStore, picker: &mut dyn PathPicker) -> bool {
        let start = store.last_used_directory().map(Path::to_path_buf);
        let Some(path) = confirmed(picker.pick_file("Open BIOS", start.as_deref(), "BIOS File", &["bin"])) else {
            return false;
        };

        log::debug!("BIOS picked: {}", path.display());
        if let Some(parent) = path.parent() {
            store.set_last_used_directory(parent.to_path_buf());
        }
        store.set_bios_path(path);
        true
    }

    pub fn screenshot_directory(&self) -> Option<&Path> {
        self.screenshot_dir.as_deref()
    }

    pub fn browse_screenshot_directory(
        &mut self,
        store: &mut SettingsStore,
        picker: &mut dyn PathPicker,
    ) -> bool {
        let start = store.last_used_directory().map(Path::to_path_buf);
        let Some(dir) = confirmed(picker.pick_folder("Choose Screenshot Directory", start.as_deref())) else {
            return false;
        };

        log::debug!("Screenshot directory picked: {}", dir.display());
        store.set_last_used_directory(dir.clone());
        store.set_screenshot_directory(dir);
        true
    }

    fn redraw(&mut self, store: &SettingsStore) {
        self.directories = store.rom_directories().to_vec();
        self.selected = None;
        self.bios_summary = bios::describe(store.bios_path());
        self.screenshot_dir = store.screenshot_directory().map(Path::to_path_buf);
    }
}

impl Panel for PathPanel {
    fn title(&self) -> &'static str {
        "Paths"
    }

    fn sync(&mut self, store: &SettingsStore) {
        let events = self.subscription.drain();

        // A full re-read already covers anything else queued alongside it
        if events.contains(&SettingsEvent::Reload) {
            self.redraw(store);
            return;
        }

        for event in events {
            match event {
                SettingsEvent::RomDirectoryAdded(dir) => self.directories.push(dir),
                SettingsEvent::BiosChanged(path) => {
                    self.bios_summary = bios::describe(Some(&path));
                }
                SettingsEvent::ScreenshotDirectoryChanged(dir) => self.screenshot_dir = Some(dir),
                SettingsEvent::Reload => {}
            }
        }
    }

    fn detach(&mut self, store: &mut SettingsStore) {
        store.unsubscribe(self.subscription.id());
    }
}

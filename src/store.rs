//! Live settings state shared by the frontend and the settings dialog
//!
//! The store owns the current [`Config`], a snapshot of what was last
//! persisted, and the list of subscribers that want to hear about changes.
//! Notifications are queued on per-subscriber channels and picked up by the
//! subscriber on its next frame, so emitting never re-enters a panel.

use crate::config::{Config, ConfigError, ExecutionMode};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Change notifications emitted by [`SettingsStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Everything may have changed; re-read the whole store
    Reload,
    RomDirectoryAdded(PathBuf),
    BiosChanged(PathBuf),
    ScreenshotDirectoryChanged(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receiving end of a store subscription
pub struct Subscription {
    id: SubscriptionId,
    receiver: Receiver<SettingsEvent>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Take every notification queued since the last call
    pub fn drain(&self) -> Vec<SettingsEvent> {
        self.receiver.try_iter().collect()
    }
}

pub struct SettingsStore {
    config: Config,
    persisted: Config,
    /// Backing file; `None` keeps everything in memory
    path: Option<PathBuf>,
    listeners: Vec<(SubscriptionId, Sender<SettingsEvent>)>,
    next_id: u64,
}

impl SettingsStore {
    /// Store backed by the file at `path`, loading it if present
    pub fn open(path: PathBuf) -> Self {
        let config = Config::load_or_default(&path);
        Self::with_config(config, Some(path))
    }

    /// Store that never touches the filesystem
    pub fn in_memory(config: Config) -> Self {
        Self::with_config(config, None)
    }

    fn with_config(config: Config, path: Option<PathBuf>) -> Self {
        Self {
            persisted: config.clone(),
            config,
            path,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the live state differs from what was last persisted
    pub fn is_dirty(&self) -> bool {
        self.config != self.persisted
    }

    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = channel();
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, tx));
        log::debug!("Settings subscriber {:?} registered", id);
        Subscription { id, receiver: rx }
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener, _)| *listener != id);
        log::debug!("Settings subscriber {:?} removed", id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn emit(&mut self, event: SettingsEvent) {
        log::debug!("Settings event: {:?}", event);
        // A failed send means the subscription was dropped without unsubscribing
        self.listeners.retain(|(_, tx)| tx.send(event.clone()).is_ok());
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        self.config.vu1_mode
    }

    /// Set the VU1 mode. Emits nothing, so bound controls cannot loop.
    pub fn set_execution_mode(&mut self, mode: ExecutionMode) {
        if self.config.vu1_mode != mode {
            log::info!("VU1 execution mode set to {}", mode);
            self.config.vu1_mode = mode;
        }
    }

    pub fn rom_directories(&self) -> &[PathBuf] {
        &self.config.rom_dirs
    }

    /// Append a ROM directory. Empty and already listed paths are ignored.
    pub fn add_rom_directory(&mut self, dir: PathBuf) -> bool {
        if dir.as_os_str().is_empty() || self.config.rom_dirs.contains(&dir) {
            return false;
        }
        log::info!("Added ROM directory: {}", dir.display());
        self.config.rom_dirs.push(dir.clone());
        self.emit(SettingsEvent::RomDirectoryAdded(dir));
        true
    }

    pub fn remove_rom_directory(&mut self, dir: &Path) -> bool {
        let before = self.config.rom_dirs.len();
        self.config.rom_dirs.retain(|d| d != dir);
        let removed = self.config.rom_dirs.len() != before;
        if removed {
            log::info!("Removed ROM directory: {}", dir.display());
        }
        removed
    }

    pub fn bios_path(&self) -> Option<&Path> {
        self.config.bios_path.as_deref()
    }

    pub fn set_bios_path(&mut self, path: PathBuf) {
        if path.as_os_str().is_empty() {
            return;
        }
        log::info!("BIOS path set to {}", path.display());
        self.config.bios_path = Some(path.clone());
        self.emit(SettingsEvent::BiosChanged(path));
    }

    pub fn screenshot_directory(&self) -> Option<&Path> {
        self.config.screenshot_dir.as_deref()
    }

    pub fn set_screenshot_directory(&mut self, dir: PathBuf) {
        if dir.as_os_str().is_empty() {
            return;
        }
        log::info!("Screenshot directory set to {}", dir.display());
        self.config.screenshot_dir = Some(dir.clone());
        self.emit(SettingsEvent::ScreenshotDirectoryChanged(dir));
    }

    pub fn last_used_directory(&self) -> Option<&Path> {
        self.config.last_used_dir.as_deref()
    }

    pub fn set_last_used_directory(&mut self, dir: PathBuf) {
        if !dir.as_os_str().is_empty() {
            self.config.last_used_dir = Some(dir);
        }
    }

    /// Persist the live state and make it the new reset point
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            self.config.save_to(path)?;
        }
        self.persisted = self.config.clone();
        Ok(())
    }

    /// Revert to the last persisted state
    pub fn reset(&mut self) {
        log::info!("Reverting settings to last saved state");
        self.config = self.persisted.clone();
        self.emit(SettingsEvent::Reload);
    }

    /// Re-read the backing file, e.g. after it was edited externally
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            let config = Config::load_from(path)?;
            self.persisted = config.clone();
            self.config = config;
        }
        self.emit(SettingsEvent::Reload);
        Ok(())
    }
}

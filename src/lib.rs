//! Settings dialog for a PS2 emulator frontend
//!
//! The core (config, store, BIOS inspection and the dialog panels) has no GUI
//! dependency. The `desktop` feature adds the egui front end.

pub mod bios;
pub mod config;
pub mod dialog;
pub mod store;

#[cfg(feature = "desktop")]
pub mod ui;

pub use config::{Config, ConfigError, ExecutionMode};
pub use dialog::{DialogOutcome, SettingsDialog, Tab};
pub use store::{SettingsEvent, SettingsStore};

//! Settings dialog state, independent of any GUI toolkit
//!
//! Each panel is a plain struct that mirrors part of the [`SettingsStore`],
//! applies store notifications in [`Panel::sync`] and exposes the user
//! actions as methods. The `ui` module draws them with egui.

mod general;
mod paths;
pub mod picker;

pub use general::{GeneralPanel, RESTART_NOTE};
pub use paths::PathPanel;
pub use picker::PathPicker;

use crate::config::ConfigError;
use crate::store::SettingsStore;

/// Common surface of the dialog's tabs
pub trait Panel {
    fn title(&self) -> &'static str;

    /// Apply every pending store notification to the view state
    fn sync(&mut self, store: &SettingsStore);

    /// Stop listening to the store
    fn detach(&mut self, store: &mut SettingsStore);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    General,
    Paths,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Accepted,
    Rejected,
}

pub struct SettingsDialog {
    general: GeneralPanel,
    paths: PathPanel,
    tab: Tab,
    outcome: Option<DialogOutcome>,
}

impl SettingsDialog {
    pub fn new(store: &mut SettingsStore) -> Self {
        Self::open_at(store, Tab::default())
    }

    /// Open with `tab` already selected
    pub fn open_at(store: &mut SettingsStore, tab: Tab) -> Self {
        log::debug!("Opening settings dialog at {:?}", tab);
        Self {
            general: GeneralPanel::new(store),
            paths: PathPanel::new(store),
            tab,
            outcome: None,
        }
    }

    pub fn current_tab(&self) -> Tab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn show_path_tab(&mut self) {
        self.select_tab(Tab::Paths);
    }

    pub fn general(&self) -> &GeneralPanel {
        &self.general
    }

    pub fn general_mut(&mut self) -> &mut GeneralPanel {
        &mut self.general
    }

    pub fn paths(&self) -> &PathPanel {
        &self.paths
    }

    pub fn paths_mut(&mut self) -> &mut PathPanel {
        &mut self.paths
    }

    pub fn tab_title(&self, tab: Tab) -> &'static str {
        match tab {
            Tab::General => self.general.title(),
            Tab::Paths => self.paths.title(),
        }
    }

    pub fn sync(&mut self, store: &SettingsStore) {
        self.general.sync(store);
        self.paths.sync(store);
    }

    pub fn outcome(&self) -> Option<DialogOutcome> {
        self.outcome
    }

    pub fn is_open(&self) -> bool {
        self.outcome.is_none()
    }

    /// Persist the store and close. On failure the dialog stays open.
    pub fn accept(&mut self, store: &mut SettingsStore) -> Result<DialogOutcome, ConfigError> {
        if let Some(outcome) = self.outcome {
            return Ok(outcome);
        }
        store.save()?;
        log::info!("Settings accepted");
        Ok(*self.outcome.insert(DialogOutcome::Accepted))
    }

    /// Revert the store to its last saved state and close
    pub fn reject(&mut self, store: &mut SettingsStore) -> DialogOutcome {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        store.reset();
        log::info!("Settings discarded");
        *self.outcome.insert(DialogOutcome::Rejected)
    }

    /// Tear down, unsubscribing both panels
    pub fn close(mut self, store: &mut SettingsStore) -> Option<DialogOutcome> {
        self.general.detach(store);
        self.paths.detach(store);
        self.outcome
    }
}

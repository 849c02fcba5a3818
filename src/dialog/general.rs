//! General tab: VU1 execution mode

use super::Panel;
use crate::config::ExecutionMode;
use crate::store::{SettingsEvent, SettingsStore, Subscription};

pub const RESTART_NOTE: &str = "NOTE: Change will take effect the next time you load a game.";

pub struct GeneralPanel {
    selected: ExecutionMode,
    subscription: Subscription,
}

impl GeneralPanel {
    pub fn new(store: &mut SettingsStore) -> Self {
        Self {
            selected: store.execution_mode(),
            subscription: store.subscribe(),
        }
    }

    pub fn selected(&self) -> ExecutionMode {
        self.selected
    }

    pub fn is_selected(&self, mode: ExecutionMode) -> bool {
        self.selected == mode
    }

    /// User picked `mode`
    pub fn select(&mut self, store: &mut SettingsStore, mode: ExecutionMode) {
        self.selected = mode;
        store.set_execution_mode(mode);
    }
}

impl Panel for GeneralPanel {
    fn title(&self) -> &'static str {
        "General"
    }

    fn sync(&mut self, store: &SettingsStore) {
        let events = self.subscription.drain();
        if events.contains(&SettingsEvent::Reload) {
            // Read only; writing back here would feed the store its own value
            self.selected = store.execution_mode();
        }
    }

    fn detach(&mut self, store: &mut SettingsStore) {
        store.unsubscribe(self.subscription.id());
    }
}

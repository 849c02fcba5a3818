//! egui front end: the settings window and a small host application

mod app;
mod picker;
mod settings_window;

pub use app::SettingsApp;
pub use picker::NativePicker;
pub use settings_window::show_settings_window;

use crate::dialog::PathPicker;
use std::path::{Path, PathBuf};

/// Native file dialogs
#[derive(Default)]
pub struct NativePicker;

impl PathPicker for NativePicker {
    fn pick_folder(&mut self, title: &str, start: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new().set_title(title);
        if let Some(dir) = start {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_folder()
    }

    fn pick_file(
        &mut self,
        title: &str,
        start: Option<&Path>,
        filter_name: &str,
        extensions: &[&str],
    ) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_title(title)
            .add_filter(filter_name, extensions);
        if let Some(dir) = start {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_file()
    }
}

use emu_settings::dialog::{Panel, PathPicker};
use emu_settings::{Config, DialogOutcome, ExecutionMode, SettingsDialog, SettingsStore, Tab};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

/// Replays queued answers; `None` is a cancelled prompt
struct Answers(VecDeque<Option<PathBuf>>);

impl Answers {
    fn new(answers: impl IntoIterator<Item = Option<PathBuf>>) -> Self {
        Self(answers.into_iter().collect())
    }
}

impl PathPicker for Answers {
    fn pick_folder(&mut self, _title: &str, _start: Option<&Path>) -> Option<PathBuf> {
        self.0.pop_front().flatten()
    }

    fn pick_file(&mut self, _: &str, _: Option<&Path>, _: &str, _: &[&str]) -> Option<PathBuf> {
        self.0.pop_front().flatten()
    }
}

fn bios_image(romver: &str) -> Vec<u8> {
    fn entry(name: &str, size: u32) -> [u8; 16] {
        let mut e = [0u8; 16];
        e[..name.len()].copy_from_slice(name.as_bytes());
        e[12..].copy_from_slice(&size.to_le_bytes());
        e
    }

    let mut data = vec![0u8; 0x100];
    data[0x40..0x50].copy_from_slice(&entry("RESET", 0x40));
    data[0x50..0x60].copy_from_slice(&entry("ROMDIR", 0x40));
    data[0x60..0x70].copy_from_slice(&entry("ROMVER", 0x10));
    data[0x80..0x80 + romver.len()].copy_from_slice(romver.as_bytes());
    data
}

#[test]
fn accept_writes_the_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut store = SettingsStore::open(path.clone());
    let mut dialog = SettingsDialog::new(&mut store);
    let mut picker = Answers::new([Some(PathBuf::from("/games/ps2"))]);

    dialog.general_mut().select(&mut store, ExecutionMode::Interpreter);
    dialog.paths_mut().add_directory(&mut store, &mut picker);
    dialog.sync(&store);
    assert!(!path.exists());

    assert_eq!(dialog.accept(&mut store).unwrap(), DialogOutcome::Accepted);
    let saved = Config::load_from(&path).unwrap();
    assert_eq!(saved.vu1_mode, ExecutionMode::Interpreter);
    assert_eq!(saved.rom_dirs, vec![PathBuf::from("/games/ps2")]);
    assert_eq!(saved.last_used_dir, Some(PathBuf::from("/games/ps2")));

    // A second confirm does not write again
    fs::remove_file(&path).unwrap();
    assert_eq!(dialog.accept(&mut store).unwrap(), DialogOutcome::Accepted);
    assert!(!path.exists());
}

#[test]
fn cancel_reverts_to_the_file_and_redraws() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    Config {
        rom_dirs: vec![PathBuf::from("/a"), PathBuf::from("/b")],
        ..Config::default()
    }
    .save_to(&path)
    .unwrap();

    let mut store = SettingsStore::open(path.clone());
    let mut dialog = SettingsDialog::open_at(&mut store, Tab::Paths);

    dialog.paths_mut().select_row(Some(0));
    dialog.paths_mut().remove_selected(&mut store);
    dialog.general_mut().select(&mut store, ExecutionMode::Interpreter);
    assert_eq!(store.rom_directories(), [PathBuf::from("/b")]);

    assert_eq!(dialog.reject(&mut store), DialogOutcome::Rejected);
    dialog.sync(&store);

    assert_eq!(store.rom_directories(), [PathBuf::from("/a"), PathBuf::from("/b")]);
    assert_eq!(dialog.paths().directories(), store.rom_directories());
    assert!(dialog.general().is_selected(ExecutionMode::Jit));
    assert_eq!(Config::load_from(&path).unwrap().vu1_mode, ExecutionMode::Jit);
}

#[test]
fn external_reload_while_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let bios = dir.path().join("x.bin");
    fs::write(&bios, bios_image("0170EC20030325")).unwrap();

    let mut store = SettingsStore::open(path.clone());
    let mut dialog = SettingsDialog::new(&mut store);
    assert!(dialog.general().is_selected(ExecutionMode::Jit));

    Config {
        vu1_mode: ExecutionMode::Interpreter,
        rom_dirs: vec![PathBuf::from("A"), PathBuf::from("B")],
        bios_path: Some(bios.clone()),
        ..Config::default()
    }
    .save_to(&path)
    .unwrap();

    store.reload().unwrap();
    dialog.sync(&store);

    assert!(dialog.general().is_selected(ExecutionMode::Interpreter));
    assert!(!dialog.general().is_selected(ExecutionMode::Jit));
    assert_eq!(dialog.paths().directories(), [PathBuf::from("A"), PathBuf::from("B")]);
    assert_eq!(dialog.paths().bios_summary(), "Europe v01.70 (2003-03-25) Console");
    assert!(!store.is_dirty());
}

#[test]
fn cancelled_pickers_leave_paths_alone() {
    let mut store = SettingsStore::in_memory(Config {
        bios_path: Some(PathBuf::from("/bios/scph.bin")),
        screenshot_dir: Some(PathBuf::from("/shots")),
        last_used_dir: Some(PathBuf::from("/home")),
        ..Config::default()
    });
    let mut dialog = SettingsDialog::open_at(&mut store, Tab::Paths);
    let mut picker = Answers::new([None, None, None]);

    let paths = dialog.paths_mut();
    assert!(!paths.browse_bios(&mut store, &mut picker));
    assert!(!paths.browse_screenshot_directory(&mut store, &mut picker));
    assert!(!paths.add_directory(&mut store, &mut picker));
    dialog.sync(&store);

    assert_eq!(store.bios_path(), Some(Path::new("/bios/scph.bin")));
    assert_eq!(store.screenshot_directory(), Some(Path::new("/shots")));
    assert_eq!(store.last_used_directory(), Some(Path::new("/home")));
    assert!(!store.is_dirty());
}

#[test]
fn closing_releases_subscriptions() {
    let mut store = SettingsStore::in_memory(Config::default());
    let mut dialog = SettingsDialog::new(&mut store);
    assert_eq!(dialog.paths().title(), "Paths");

    dialog.accept(&mut store).unwrap();
    dialog.close(&mut store);
    assert_eq!(store.subscriber_count(), 0);

    // Changes after close reach nobody and break nothing
    store.add_rom_directory(PathBuf::from("/late"));
    store.reset();
    assert!(store.rom_directories().is_empty());
}

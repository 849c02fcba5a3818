use clap::Parser;
use emu_settings::dialog::Tab;
use emu_settings::ui::SettingsApp;
use emu_settings::{Config, SettingsStore};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "emu-settings")]
#[command(about = "Emulator settings: VU1 mode, ROM directories, BIOS and screenshots", long_about = None)]
struct Args {
    /// Settings file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Open the settings dialog on the Paths tab
    #[arg(long)]
    paths: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> eframe::Result {
    let args = Args::parse();

    // RUST_LOG wins over --debug when set
    let log_level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level);
    builder.parse_default_env();
    builder.init();

    let config_path = args.config.unwrap_or_else(Config::default_path);
    log::info!("Using settings file: {}", config_path.display());

    let store = SettingsStore::open(config_path);
    let mut app = SettingsApp::new(store);
    if args.paths {
        app.open_settings(Tab::Paths);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Emulator Settings")
            .with_inner_size([560.0, 420.0])
            .with_min_inner_size([420.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "emu-settings",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

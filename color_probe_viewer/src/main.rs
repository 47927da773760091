// Desktop front end for `color_probe`: load an image, click it, read the color.

mod app;

use std::path::PathBuf;

use app::ColorProbeApp;
use color_probe::logging::{init_logging, LoggingConfig};
use color_probe::ProbeConfig;
use eframe::NativeOptions;

const WINDOW_TITLE: &str = "Click to Identify Color";

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    // --- 1. Argument Parsing & Setup ---
    let initial_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ProbeConfig::from_env();

    // --- 2. Window ---
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([600.0, 500.0])
        .with_title(WINDOW_TITLE);
    let options = NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Box::new(ColorProbeApp::new(cc, config, initial_path))),
    )
    .map_err(|err| anyhow::anyhow!("viewer exited with an error: {err}"))
}
